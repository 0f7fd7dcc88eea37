//! Gradient machinery shared by the edge operators.
//!
//! - Gradient computation for the Sobel, Scharr, Prewitt and Roberts kernel
//!   pairs, returning `gx`, `gy` and the Euclidean magnitude.
//! - Direction-aligned non-maximum suppression on a magnitude plane.
//! - Canny: L1 Sobel magnitude, suppression, then two-threshold hysteresis.
//!
//! Borders are handled by clamping indices (replicate) everywhere.

pub mod canny;
pub mod grad;
pub mod nms;

pub use canny::{canny, hysteresis};
pub use grad::{image_gradients, Grad, GradientKernel};
pub use nms::suppress_non_maxima;
