//! The image-to-image operators of the catalog.
//!
//! Edge and threshold operators work on the BT.601 luminance plane and
//! replicate their result across three channels. The smoothing operators work
//! on every channel of the input and return a 3-channel image as well. All of
//! them allocate a new image and leave the input untouched.

pub mod bilateral;
pub mod gradient;
pub mod laplace;
pub mod median;
pub mod smooth;
pub mod threshold;

pub use bilateral::bilateral_filter;
pub use gradient::{prewitt, roberts, scharr, sobel};
pub use laplace::{laplacian, laplacian_of_gaussian};
pub use median::median_filter;
pub use smooth::{gaussian_blur, gaussian_taps, GaussianFilter, SeparableFilter};
pub use threshold::{otsu, otsu_threshold};

use crate::edges;
use crate::image::Image;

/// Canny edge map replicated to three channels.
pub fn canny(image: &Image, low: f32, high: f32) -> Image {
    let edges = edges::canny(&image.to_luma(), low, high);
    Image::from_luma(&edges).to_bgr()
}
