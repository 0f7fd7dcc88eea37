//! Canny edge detector: Sobel gradients, non-maximum suppression, hysteresis.
use super::grad::{image_gradients, GradientKernel};
use super::nms::suppress_non_maxima;
use crate::image::ImageF32;
use ::image::GrayImage;

const EDGE: u8 = 255;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    None,
    Weak,
    Strong,
}

/// Binary edge map of a gray plane. Thresholds apply to the L1 Sobel
/// magnitude on the 0–255 intensity scale (`low < high`).
pub fn canny(gray: &GrayImage, low: f32, high: f32) -> GrayImage {
    let plane = ImageF32::from_luma(gray);
    let grad = image_gradients(&plane, GradientKernel::Sobel);
    let magnitude = grad.l1_magnitude();
    let thin = suppress_non_maxima(&grad.gx, &grad.gy, &magnitude);
    hysteresis(&thin, low, high)
}

/// Two-threshold edge linking: samples above `high` are edges outright,
/// samples above `low` only when 8-connected to an edge.
pub fn hysteresis(thin: &ImageF32, low: f32, high: f32) -> GrayImage {
    let (w, h) = (thin.w, thin.h);
    let mut marks = vec![Mark::None; w * h];
    let mut stack = Vec::new();

    for (idx, &v) in thin.data.iter().enumerate() {
        if v > high {
            marks[idx] = Mark::Strong;
            stack.push((idx % w, idx / w));
        } else if v > low {
            marks[idx] = Mark::Weak;
        }
    }

    while let Some((x, y)) = stack.pop() {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(h - 1);
        let x0 = x.saturating_sub(1);
        let x1 = (x + 1).min(w - 1);
        for ny in y0..=y1 {
            for nx in x0..=x1 {
                let nidx = ny * w + nx;
                if marks[nidx] == Mark::Weak {
                    marks[nidx] = Mark::Strong;
                    stack.push((nx, ny));
                }
            }
        }
    }

    let data = marks
        .iter()
        .map(|&m| if m == Mark::Strong { EDGE } else { 0 })
        .collect();
    GrayImage::from_raw(w as u32, h as u32, data)
        .unwrap_or_else(|| GrayImage::new(w as u32, h as u32))
}
