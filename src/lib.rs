#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod catalog;
pub mod config;
pub mod error;
pub mod face;
pub mod image;
pub mod ops;
pub mod workbench;

// Building blocks shared by the operators.
pub mod edges;
pub mod histogram;
pub mod kernel;

// --- High-level re-exports -------------------------------------------------

pub use crate::catalog::{Operator, OperatorCatalog, OperatorEntry, OperatorGroup};
pub use crate::config::OperatorParams;
pub use crate::error::{Result, VisionError};
pub use crate::face::{BoundingBox, CascadeClassifier, Detection, FaceLocator, HaarCascade};
pub use crate::image::Image;
pub use crate::workbench::Workbench;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use vision_lab::prelude::*;
///
/// let img = Image::filled(32, 24, [0, 128, 255]).unwrap();
/// let catalog = OperatorCatalog::new();
/// let edges = catalog.apply("sobel", &img).unwrap();
/// assert_eq!((edges.width(), edges.height(), edges.channels()), (32, 24, 3));
/// ```
pub mod prelude {
    pub use crate::face::{BoundingBox, Detection, FaceLocator, ScanParams};
    pub use crate::{Image, OperatorCatalog, OperatorParams, VisionError, Workbench};
}
