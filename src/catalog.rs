//! Operator catalog: name-based dispatch over the image operators.
//!
//! The catalog owns the operator parameters and, optionally, a
//! [`FaceLocator`]. It is immutable once built and can be shared between
//! threads; every call works on a borrowed input and returns a new
//! 3-channel image.
use crate::config::OperatorParams;
use crate::error::{Result, VisionError};
use crate::face::{Detection, FaceLocator};
use crate::image::Image;
use crate::ops;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorGroup {
    Core,
    Auxiliary,
    Detection,
}

impl OperatorGroup {
    pub fn label(self) -> &'static str {
        match self {
            OperatorGroup::Core => "Core",
            OperatorGroup::Auxiliary => "Auxiliary",
            OperatorGroup::Detection => "Detection",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Canny,
    Laplacian,
    Sobel,
    Roberts,
    Prewitt,
    Scharr,
    Otsu,
    LaplacianOfGaussian,
    GaussianBlur,
    Bilateral,
    Median,
    FaceDetection,
}

impl Operator {
    /// Every operator in display order.
    pub const ALL: [Operator; 12] = [
        Operator::Canny,
        Operator::Laplacian,
        Operator::Sobel,
        Operator::Roberts,
        Operator::Prewitt,
        Operator::Scharr,
        Operator::Otsu,
        Operator::LaplacianOfGaussian,
        Operator::GaussianBlur,
        Operator::Bilateral,
        Operator::Median,
        Operator::FaceDetection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operator::Canny => "canny",
            Operator::Laplacian => "laplacian",
            Operator::Sobel => "sobel",
            Operator::Roberts => "roberts",
            Operator::Prewitt => "prewitt",
            Operator::Scharr => "scharr",
            Operator::Otsu => "otsu",
            Operator::LaplacianOfGaussian => "log",
            Operator::GaussianBlur => "gaussian-blur",
            Operator::Bilateral => "bilateral",
            Operator::Median => "median",
            Operator::FaceDetection => "face-detection",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operator::Canny => "Canny",
            Operator::Laplacian => "Laplacian",
            Operator::Sobel => "Sobel",
            Operator::Roberts => "Roberts",
            Operator::Prewitt => "Prewitt",
            Operator::Scharr => "Scharr",
            Operator::Otsu => "Otsu Threshold",
            Operator::LaplacianOfGaussian => "Laplacian of Gaussian",
            Operator::GaussianBlur => "Gaussian Blur",
            Operator::Bilateral => "Bilateral Filter",
            Operator::Median => "Median Filter",
            Operator::FaceDetection => "Face Detection",
        }
    }

    pub fn group(self) -> OperatorGroup {
        match self {
            Operator::Canny
            | Operator::Laplacian
            | Operator::Sobel
            | Operator::Roberts
            | Operator::Prewitt
            | Operator::Scharr
            | Operator::Otsu => OperatorGroup::Core,
            Operator::LaplacianOfGaussian
            | Operator::GaussianBlur
            | Operator::Bilateral
            | Operator::Median => OperatorGroup::Auxiliary,
            Operator::FaceDetection => OperatorGroup::Detection,
        }
    }
}

impl FromStr for Operator {
    type Err = VisionError;

    fn from_str(s: &str) -> Result<Self> {
        Operator::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| VisionError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Listing row of the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OperatorEntry {
    pub name: &'static str,
    pub group: OperatorGroup,
    pub label: &'static str,
}

impl From<Operator> for OperatorEntry {
    fn from(op: Operator) -> Self {
        Self {
            name: op.name(),
            group: op.group(),
            label: op.label(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct OperatorCatalog {
    params: OperatorParams,
    entries: Vec<OperatorEntry>,
    locator: Option<FaceLocator>,
}

impl Default for OperatorCatalog {
    fn default() -> Self {
        Self {
            params: OperatorParams::default(),
            entries: Operator::ALL.into_iter().map(OperatorEntry::from).collect(),
            locator: None,
        }
    }
}

impl OperatorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with non-default parameters; rejects invalid ones.
    pub fn with_params(params: OperatorParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            ..Self::default()
        })
    }

    /// Attach the locator used by `face-detection`. The catalog's scan
    /// parameters replace the locator's own.
    pub fn with_face_locator(mut self, locator: FaceLocator) -> Self {
        self.locator = Some(locator.with_params(self.params.face));
        self
    }

    pub fn entries(&self) -> &[OperatorEntry] {
        &self.entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn face_locator(&self) -> Option<&FaceLocator> {
        self.locator.as_ref()
    }

    /// Apply the operator registered under `name` to `image`.
    pub fn apply(&self, name: &str, image: &Image) -> Result<Image> {
        let op: Operator = name.parse()?;
        self.apply_operator(op, image)
    }

    pub fn apply_operator(&self, op: Operator, image: &Image) -> Result<Image> {
        image.validate()?;
        let start = Instant::now();
        let p = &self.params;
        let out = match op {
            Operator::Canny => ops::canny(image, p.canny.low, p.canny.high),
            Operator::Laplacian => ops::laplacian(image),
            Operator::Sobel => ops::sobel(image),
            Operator::Roberts => ops::roberts(image),
            Operator::Prewitt => ops::prewitt(image),
            Operator::Scharr => ops::scharr(image),
            Operator::Otsu => ops::otsu(image),
            Operator::LaplacianOfGaussian => ops::laplacian_of_gaussian(image),
            Operator::GaussianBlur => {
                ops::gaussian_blur(image, p.gaussian_blur.ksize, p.gaussian_blur.sigma)
            }
            Operator::Bilateral => ops::bilateral_filter(
                image,
                p.bilateral.diameter,
                p.bilateral.sigma_color,
                p.bilateral.sigma_space,
            ),
            Operator::Median => ops::median_filter(image, p.median.ksize),
            Operator::FaceDetection => self.detect(image)?.annotated,
        };
        log::debug!(
            "{op} {}x{}x{} in {:.2} ms",
            image.width(),
            image.height(),
            image.channels(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(out)
    }

    /// Apply one operator to independent images (e.g. video frames) in
    /// parallel. Results keep the input order.
    pub fn apply_many(&self, name: &str, images: &[Image]) -> Vec<Result<Image>> {
        match name.parse::<Operator>() {
            Ok(op) => images
                .par_iter()
                .map(|image| self.apply_operator(op, image))
                .collect(),
            Err(err) => images.iter().map(|_| Err(err.clone())).collect(),
        }
    }

    /// Full face-detection result, including boxes and annotations.
    pub fn detect(&self, image: &Image) -> Result<Detection> {
        let locator = self.locator.as_ref().ok_or_else(|| {
            VisionError::ClassifierUnavailable("no face cascade loaded".to_string())
        })?;
        locator.detect(image)
    }
}
