//! Intensity histograms of 8-bit gray planes and histogram equalization.
use ::image::GrayImage;
use rayon::prelude::*;

pub fn compute_histogram(image: &GrayImage) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for &v in image.as_raw() {
        hist[v as usize] += 1;
    }
    hist
}

pub fn compute_cdf(hist: &[u32; 256]) -> [u32; 256] {
    let mut cdf = [0u32; 256];
    let mut acc = 0u32;
    for (dst, &count) in cdf.iter_mut().zip(hist.iter()) {
        acc += count;
        *dst = acc;
    }
    cdf
}

/// Spread intensities so the cumulative histogram becomes roughly linear.
///
/// The darkest occupied level maps to 0 and the brightest to 255. A constant
/// image has nothing to spread and is returned unchanged.
pub fn equalize_histogram(image: &GrayImage) -> GrayImage {
    let hist = compute_histogram(image);
    let cdf = compute_cdf(&hist);

    let cdf_min = cdf.iter().find(|&&c| c > 0).copied().unwrap_or(0);
    let total = image.width() * image.height();

    let mut lut = [0u8; 256];
    if total > cdf_min {
        let scale = 255.0 / (total - cdf_min) as f32;
        for (dst, &c) in lut.iter_mut().zip(cdf.iter()) {
            *dst = (c.saturating_sub(cdf_min) as f32 * scale)
                .round()
                .clamp(0.0, 255.0) as u8;
        }
    } else {
        for (i, dst) in lut.iter_mut().enumerate() {
            *dst = i as u8;
        }
    }

    let width = image.width() as usize;
    let mut output = GrayImage::new(image.width(), image.height());
    if width == 0 {
        return output;
    }
    let src_raw = image.as_raw();
    output
        .par_chunks_mut(width)
        .zip(src_raw.par_chunks(width))
        .for_each(|(dst_row, src_row)| {
            for (dst, &src) in dst_row.iter_mut().zip(src_row) {
                *dst = lut[src as usize];
            }
        });

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::Luma;

    #[test]
    fn histogram_counts_every_pixel() {
        let img = GrayImage::from_fn(4, 4, |x, _| Luma([if x < 2 { 10 } else { 200 }]));
        let hist = compute_histogram(&img);
        assert_eq!(hist[10], 8);
        assert_eq!(hist[200], 8);
        assert_eq!(compute_cdf(&hist)[255], 16);
    }

    #[test]
    fn equalization_stretches_narrow_range() {
        let img = GrayImage::from_fn(4, 1, |x, _| Luma([100 + x as u8]));
        let eq = equalize_histogram(&img);
        assert_eq!(eq.as_raw(), &vec![0, 85, 170, 255]);
    }

    #[test]
    fn constant_image_is_unchanged() {
        let img = GrayImage::from_pixel(5, 3, Luma([42]));
        assert_eq!(equalize_histogram(&img), img);
    }
}
