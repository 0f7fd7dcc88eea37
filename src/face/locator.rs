//! Face localisation on top of a cascade classifier.
use super::cascade::{CascadeClassifier, HaarCascade};
use super::draw::{draw_rect_outline, draw_text};
use super::types::{Annotation, BoundingBox, Detection, ScanParams, FACE_LABEL, NO_FACES_TEXT};
use crate::error::Result;
use crate::histogram::equalize_histogram;
use crate::image::Image;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

const BOX_COLOR: [u8; 3] = [0, 255, 0];
const BOX_THICKNESS: u32 = 3;
const LABEL_SCALE: f32 = 0.9;
const LABEL_OFFSET: i32 = 10;
const MESSAGE_COLOR: [u8; 3] = [0, 0, 255];
const MESSAGE_ORIGIN: (i32, i32) = (10, 30);
const MESSAGE_SCALE: f32 = 1.0;

/// Detects faces and renders them onto a copy of the input.
#[derive(Clone)]
pub struct FaceLocator {
    classifier: Arc<dyn CascadeClassifier>,
    params: ScanParams,
}

impl std::fmt::Debug for FaceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceLocator")
            .field("window", &self.classifier.window_size())
            .field("params", &self.params)
            .finish()
    }
}

impl FaceLocator {
    pub fn new(classifier: Arc<dyn CascadeClassifier>) -> Self {
        Self {
            classifier,
            params: ScanParams::default(),
        }
    }

    /// Load a Haar cascade, OpenCV XML (`.xml`) or JSON; failures surface as
    /// `ClassifierUnavailable`.
    pub fn from_cascade_file(path: impl AsRef<Path>) -> Result<Self> {
        let cascade = HaarCascade::from_file(path)?;
        Ok(Self::new(Arc::new(cascade)))
    }

    pub fn with_params(mut self, params: ScanParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &ScanParams {
        &self.params
    }

    /// Confirmed face regions, clipped to the image.
    pub fn locate(&self, image: &Image) -> Result<Vec<BoundingBox>> {
        image.validate()?;
        let start = Instant::now();
        let gray = equalize_histogram(&image.to_luma());
        let (w, h) = (gray.width(), gray.height());
        let boxes: Vec<BoundingBox> = self
            .classifier
            .detect_multi_scale(&gray, &self.params)
            .into_iter()
            .filter_map(|b| b.clipped_to(w, h))
            .collect();
        log::debug!(
            "face scan {}x{}: {} region(s) in {:.2} ms",
            w,
            h,
            boxes.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(boxes)
    }

    /// Locate faces and draw them onto a 3-channel copy of `image`.
    pub fn detect(&self, image: &Image) -> Result<Detection> {
        let boxes = self.locate(image)?;
        let (annotated, annotations) = annotate(image, &boxes);
        Ok(Detection {
            annotated,
            boxes,
            annotations,
        })
    }
}

/// Draw `boxes` with their labels, or the no-face message when there are none.
pub fn annotate(image: &Image, boxes: &[BoundingBox]) -> (Image, Vec<Annotation>) {
    let mut out = image.to_bgr();
    let mut annotations = Vec::with_capacity(boxes.len().max(1));

    if boxes.is_empty() {
        let (x, y) = MESSAGE_ORIGIN;
        draw_text(&mut out, NO_FACES_TEXT, x as i64, y as i64, MESSAGE_SCALE, MESSAGE_COLOR);
        annotations.push(Annotation::Text {
            text: NO_FACES_TEXT.to_string(),
            x,
            y,
            scale: MESSAGE_SCALE,
            color: MESSAGE_COLOR,
        });
        return (out, annotations);
    }

    for b in boxes {
        draw_rect_outline(
            &mut out,
            b.x as i64,
            b.y as i64,
            b.right() as i64,
            b.bottom() as i64,
            BOX_COLOR,
            BOX_THICKNESS,
        );
        let label_y = b.y as i64 - LABEL_OFFSET as i64;
        draw_text(&mut out, FACE_LABEL, b.x as i64, label_y, LABEL_SCALE, BOX_COLOR);
        annotations.push(Annotation::Box {
            bbox: *b,
            label: FACE_LABEL.to_string(),
            color: BOX_COLOR,
            thickness: BOX_THICKNESS,
        });
    }
    (out, annotations)
}
