//! Face-region detection.
//!
//! A [`FaceLocator`] equalizes the luminance of an image, hands it to a
//! [`CascadeClassifier`] for the multi-scale window scan and renders the
//! confirmed regions onto a copy of the input.
pub mod cascade;
pub mod draw;
pub mod grouping;
pub mod integral;
pub mod locator;
mod opencv_xml;
pub mod types;

pub use cascade::{CascadeClassifier, CascadeStage, HaarCascade, HaarRect, WeakClassifier};
pub use grouping::group_rectangles;
pub use integral::IntegralImage;
pub use locator::{annotate, FaceLocator};
pub use types::{Annotation, BoundingBox, Detection, ScanParams, FACE_LABEL, NO_FACES_TEXT};
