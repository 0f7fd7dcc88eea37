//! Boosted cascade of Haar-like features.
//!
//! A cascade is a sequence of stages. Each stage sums the votes of its weak
//! classifiers (decision stumps on one Haar feature) and rejects the window
//! when the sum falls below the stage threshold, so most windows are dropped
//! after the first stage or two. Feature responses are normalised by the
//! window area and compared with `threshold * σ`, where σ is the standard
//! deviation of the window, which makes a trained cascade insensitive to
//! global contrast.
//!
//! Cascades are stored as JSON:
//!
//! ```json
//! { "window": [24, 24],
//!   "stages": [ { "threshold": 0.0,
//!                 "weak": [ { "rects": [[0, 0, 24, 24, -1.0], [6, 6, 12, 12, 4.0]],
//!                             "threshold": 1.0, "left": -1.0, "right": 1.0 } ] } ] }
//! ```
use super::grouping::group_rectangles;
use super::integral::IntegralImage;
use super::opencv_xml::parse_opencv_cascade;
use super::types::{BoundingBox, ScanParams};
use crate::error::{Result, VisionError};
use ::image::GrayImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Grouping tolerance for raw window hits.
const GROUP_EPS: f32 = 0.2;

/// Capability of classifying image windows at every position and scale.
pub trait CascadeClassifier: Send + Sync {
    /// Size of the base window, (width, height).
    fn window_size(&self) -> (u32, u32);

    /// Scan `gray` at all scales allowed by `params` and return the grouped
    /// detections in image coordinates.
    fn detect_multi_scale(&self, gray: &GrayImage, params: &ScanParams) -> Vec<BoundingBox>;
}

/// One weighted rectangle of a Haar feature, in base-window coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(u32, u32, u32, u32, f32)", into = "(u32, u32, u32, u32, f32)")]
pub struct HaarRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub weight: f32,
}

impl From<(u32, u32, u32, u32, f32)> for HaarRect {
    fn from((x, y, w, h, weight): (u32, u32, u32, u32, f32)) -> Self {
        Self { x, y, w, h, weight }
    }
}

impl From<HaarRect> for (u32, u32, u32, u32, f32) {
    fn from(r: HaarRect) -> Self {
        (r.x, r.y, r.w, r.h, r.weight)
    }
}

/// Decision stump on one Haar feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeakClassifier {
    pub rects: Vec<HaarRect>,
    pub threshold: f32,
    /// Vote when the normalised response is below `threshold * σ`.
    pub left: f32,
    /// Vote otherwise.
    pub right: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CascadeStage {
    pub threshold: f32,
    pub weak: Vec<WeakClassifier>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HaarCascade {
    /// Base window (width, height) the features were trained on.
    pub window: (u32, u32),
    pub stages: Vec<CascadeStage>,
}

/// Feature rectangle scaled to one window size, relative to the window origin.
#[derive(Clone, Copy, Debug)]
struct ScaledRect {
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    weight: f32,
}

struct ScaledWeak {
    rects: Vec<ScaledRect>,
    threshold: f32,
    left: f32,
    right: f32,
}

struct ScaledStage {
    threshold: f32,
    weak: Vec<ScaledWeak>,
}

impl HaarCascade {
    pub fn from_json_str(data: &str) -> Result<Self> {
        let cascade: HaarCascade = serde_json::from_str(data)
            .map_err(|e| VisionError::ClassifierUnavailable(format!("invalid cascade: {e}")))?;
        cascade.validate()?;
        Ok(cascade)
    }

    /// Parse a trained OpenCV cascade (`haarcascade_*.xml`).
    pub fn from_opencv_xml_str(data: &str) -> Result<Self> {
        parse_opencv_cascade(data)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::loaded(path, Self::from_json_str(&read_cascade(path)?)?)
    }

    pub fn from_opencv_xml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::loaded(path, Self::from_opencv_xml_str(&read_cascade(path)?)?)
    }

    /// Load by extension: `.xml` is read as an OpenCV cascade, anything else
    /// as the JSON layout.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_xml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if is_xml {
            Self::from_opencv_xml(path)
        } else {
            Self::from_json_file(path)
        }
    }

    fn loaded(path: &Path, cascade: Self) -> Result<Self> {
        log::debug!(
            "loaded cascade {} window={:?} stages={}",
            path.display(),
            cascade.window,
            cascade.stages.len()
        );
        Ok(cascade)
    }

    /// Check the cascade is usable: a non-empty window, at least one stage and
    /// every feature rectangle inside the window.
    pub fn validate(&self) -> Result<()> {
        let (ww, wh) = self.window;
        if ww == 0 || wh == 0 {
            return Err(VisionError::ClassifierUnavailable(
                "cascade window is empty".to_string(),
            ));
        }
        if self.stages.is_empty() {
            return Err(VisionError::ClassifierUnavailable(
                "cascade has no stages".to_string(),
            ));
        }
        for (si, stage) in self.stages.iter().enumerate() {
            for weak in &stage.weak {
                for r in &weak.rects {
                    let right = r.x as u64 + r.w as u64;
                    let bottom = r.y as u64 + r.h as u64;
                    if r.w == 0 || r.h == 0 || right > ww as u64 || bottom > wh as u64 {
                        return Err(VisionError::ClassifierUnavailable(format!(
                            "stage {si}: rectangle {:?} outside the {ww}x{wh} window",
                            (r.x, r.y, r.w, r.h)
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn scaled_stages(&self, scale: f64, win_w: usize, win_h: usize) -> Vec<ScaledStage> {
        let scale_rect = |r: &HaarRect| {
            let x = ((r.x as f64 * scale).round() as usize).min(win_w - 1);
            let y = ((r.y as f64 * scale).round() as usize).min(win_h - 1);
            let w = ((r.w as f64 * scale).round() as usize).clamp(1, win_w - x);
            let h = ((r.h as f64 * scale).round() as usize).clamp(1, win_h - y);
            ScaledRect {
                x,
                y,
                w,
                h,
                weight: r.weight,
            }
        };
        self.stages
            .iter()
            .map(|stage| ScaledStage {
                threshold: stage.threshold,
                weak: stage
                    .weak
                    .iter()
                    .map(|weak| ScaledWeak {
                        rects: zero_mean(weak.rects.iter().map(&scale_rect).collect()),
                        threshold: weak.threshold,
                        left: weak.left,
                        right: weak.right,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Raw window hits before grouping.
    pub fn scan(&self, gray: &GrayImage, params: &ScanParams) -> Vec<BoundingBox> {
        let (img_w, img_h) = (gray.width() as usize, gray.height() as usize);
        let (base_w, base_h) = self.window;
        if img_w < base_w as usize || img_h < base_h as usize {
            log::warn!(
                "image {img_w}x{img_h} is smaller than the cascade window {base_w}x{base_h}"
            );
            return Vec::new();
        }
        let factor = if params.scale_factor.is_finite() && params.scale_factor > 1.0 {
            params.scale_factor as f64
        } else {
            let fallback = ScanParams::default().scale_factor;
            log::warn!(
                "scale factor {} must exceed 1, using {fallback}",
                params.scale_factor
            );
            fallback as f64
        };
        let (max_w, max_h) = params
            .max_size
            .map(|(w, h)| (w as usize, h as usize))
            .unwrap_or((img_w, img_h));

        let integral = IntegralImage::new(gray);
        let mut hits = Vec::new();
        let mut scale = 1.0f64;
        loop {
            let win_w = (base_w as f64 * scale).round() as usize;
            let win_h = (base_h as f64 * scale).round() as usize;
            if win_w > img_w || win_h > img_h || win_w > max_w || win_h > max_h {
                break;
            }
            if win_w >= params.min_size.0 as usize && win_h >= params.min_size.1 as usize {
                let stages = self.scaled_stages(scale, win_w, win_h);
                let step = ((2.0 * scale).round() as usize).max(1);
                let ys: Vec<usize> = (0..=img_h - win_h).step_by(step).collect();
                let (stages, integral) = (&stages, &integral);
                let found: Vec<BoundingBox> = ys
                    .par_iter()
                    .flat_map_iter(move |&y| {
                        (0..=img_w - win_w).step_by(step).filter_map(move |x| {
                            evaluate_window(stages, integral, x, y, win_w, win_h).then(|| {
                                BoundingBox::new(x as u32, y as u32, win_w as u32, win_h as u32)
                            })
                        })
                    })
                    .collect();
                hits.extend(found);
            }
            scale *= factor;
        }
        hits
    }
}

impl CascadeClassifier for HaarCascade {
    fn window_size(&self) -> (u32, u32) {
        self.window
    }

    fn detect_multi_scale(&self, gray: &GrayImage, params: &ScanParams) -> Vec<BoundingBox> {
        let raw = self.scan(gray, params);
        let grouped = group_rectangles(&raw, params.min_neighbors, GROUP_EPS);
        log::debug!(
            "cascade scan {}x{}: raw={} grouped={}",
            gray.width(),
            gray.height(),
            raw.len(),
            grouped.len()
        );
        grouped
    }
}

/// Re-derive the first rectangle's weight so the weighted areas of the
/// rounded rectangles sum to zero again, as they do for trained features.
fn zero_mean(mut rects: Vec<ScaledRect>) -> Vec<ScaledRect> {
    if let [first, rest @ ..] = rects.as_mut_slice() {
        if !rest.is_empty() {
            let rest_sum: f32 = rest.iter().map(|r| r.weight * (r.w * r.h) as f32).sum();
            first.weight = -rest_sum / (first.w * first.h) as f32;
        }
    }
    rects
}

fn read_cascade(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        VisionError::ClassifierUnavailable(format!(
            "failed to read cascade {}: {e}",
            path.display()
        ))
    })
}

fn evaluate_window(
    stages: &[ScaledStage],
    integral: &IntegralImage,
    x: usize,
    y: usize,
    win_w: usize,
    win_h: usize,
) -> bool {
    let area = (win_w * win_h) as f64;
    let inv_area = 1.0 / area;
    let mean = integral.rect_sum(x, y, win_w, win_h) as f64 * inv_area;
    let var = integral.rect_sq_sum(x, y, win_w, win_h) as f64 * inv_area - mean * mean;
    let std = if var > 1.0 { var.sqrt() } else { 1.0 } as f32;

    for stage in stages {
        let mut stage_sum = 0.0f32;
        for weak in &stage.weak {
            let response: f64 = weak
                .rects
                .iter()
                .map(|r| {
                    r.weight as f64 * integral.rect_sum(x + r.x, y + r.y, r.w, r.h) as f64
                })
                .sum();
            let response = (response * inv_area) as f32;
            stage_sum += if response < weak.threshold * std {
                weak.left
            } else {
                weak.right
            };
        }
        if stage_sum < stage.threshold {
            return false;
        }
    }
    true
}
