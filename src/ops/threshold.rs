//! Otsu binarization.
use crate::histogram::compute_histogram;
use crate::image::Image;
use ::image::GrayImage;

/// Threshold maximizing the between-class variance of the histogram.
///
/// When a run of thresholds ties for the maximum (an empty stretch of the
/// histogram between two populations) the middle of the run is returned. A
/// constant image yields its own level, so binarization turns it black.
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let hist = compute_histogram(gray);
    let total = gray.as_raw().len() as f64;

    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut weight_background = 0.0f64;
    let mut sum_background = 0.0f64;
    let mut best_between = -1.0f64;
    let mut first_best = 0u8;
    let mut last_best = 0u8;

    for t in 0..=255u8 {
        let count = hist[t as usize] as f64;
        weight_background += count;
        sum_background += t as f64 * count;
        if weight_background <= f64::EPSILON {
            continue;
        }
        let weight_foreground = total - weight_background;
        if weight_foreground <= f64::EPSILON {
            break;
        }

        let mean_background = sum_background / weight_background;
        let mean_foreground = (sum_all - sum_background) / weight_foreground;
        let diff = mean_background - mean_foreground;
        let between = weight_background * weight_foreground * diff * diff;

        if between > best_between {
            best_between = between;
            first_best = t;
            last_best = t;
        } else if between == best_between {
            last_best = t;
        }
    }

    if best_between < 0.0 {
        // single occupied level: nothing lies above it
        return hist.iter().rposition(|&c| c > 0).unwrap_or(0) as u8;
    }

    ((first_best as u16 + last_best as u16) / 2) as u8
}

/// Binarize the luminance at the Otsu threshold: `v > t` becomes 255.
pub fn otsu(image: &Image) -> Image {
    let mut gray = image.to_luma();
    let t = otsu_threshold(&gray);
    log::debug!("otsu threshold={t}");
    for v in gray.iter_mut() {
        *v = if *v > t { 255 } else { 0 };
    }
    Image::from_luma(&gray).to_bgr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::Luma;

    #[test]
    fn bimodal_threshold_sits_between_modes() {
        let gray = GrayImage::from_fn(10, 10, |x, _| Luma([if x < 5 { 20 } else { 200 }]));
        let t = otsu_threshold(&gray);
        assert!(t > 20 && t < 200, "threshold {t}");
    }

    #[test]
    fn constant_image_thresholds_to_black() {
        let gray = GrayImage::from_pixel(4, 4, Luma([77]));
        let out = otsu(&Image::from_luma(&gray));
        assert!(out.as_bytes().iter().all(|&v| v == 0));
    }
}
