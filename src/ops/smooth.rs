//! Separable Gaussian smoothing of every channel.
//!
//! The blur runs a horizontal pass then a vertical pass of the same 1-D taps,
//! in f32, and quantizes once at the end. Border samples clamp to the image
//! extents.
use crate::image::{Image, ImageF32, ImageView, ImageViewMut};
use crate::kernel::clamp_index;
use rayon::prelude::*;

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Normalised Gaussian taps for one kernel size.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianFilter {
    taps: Vec<f32>,
}

impl GaussianFilter {
    /// `sigma <= 0` derives the deviation from the kernel size.
    pub fn new(ksize: usize, sigma: f32) -> Self {
        Self {
            taps: gaussian_taps(ksize, sigma),
        }
    }
}

impl SeparableFilter for GaussianFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

// Binomial rows used for small kernels when no sigma is given.
const BINOMIAL_3: [f32; 3] = [0.25, 0.5, 0.25];
const BINOMIAL_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];
const BINOMIAL_7: [f32; 7] = [
    0.031_25, 0.109_375, 0.218_75, 0.281_25, 0.218_75, 0.109_375, 0.031_25,
];

/// 1-D Gaussian taps of odd length `ksize`, summing to one.
///
/// With `sigma <= 0` the deviation is `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`,
/// and sizes up to 7 use the fixed binomial rows instead.
pub fn gaussian_taps(ksize: usize, sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        match ksize {
            1 => return vec![1.0],
            3 => return BINOMIAL_3.to_vec(),
            5 => return BINOMIAL_5.to_vec(),
            7 => return BINOMIAL_7.to_vec(),
            _ => {}
        }
    }
    let sigma = if sigma > 0.0 {
        sigma as f64
    } else {
        0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let radius = (ksize / 2) as f64;
    let scale = -0.5 / (sigma * sigma);
    let raw: Vec<f64> = (0..ksize)
        .map(|i| {
            let x = i as f64 - radius;
            (scale * x * x).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.iter().map(|&v| (v / sum) as f32).collect()
}

/// Convolve one plane with `filter` along rows, then along columns.
pub fn separable_convolve(src: &ImageF32, filter: &dyn SeparableFilter) -> ImageF32 {
    let taps = filter.taps();
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 || taps.is_empty() {
        return src.clone();
    }
    let radius = (taps.len() / 2) as isize;

    let mut horizontal = ImageF32::new(w, h);
    horizontal
        .data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let src_row = src.row(y);
            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (k, &tap) in taps.iter().enumerate() {
                    let sx = clamp_index(x as isize + k as isize - radius, w);
                    acc += tap * src_row[sx];
                }
                *dst_px = acc;
            }
        });

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst_row = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius, h);
            for (dst_px, &v) in dst_row.iter_mut().zip(horizontal.row(sy)) {
                *dst_px += tap * v;
            }
        }
    }
    out
}

/// Gaussian blur of every channel with a `ksize × ksize` kernel.
pub fn gaussian_blur(image: &Image, ksize: usize, sigma: f32) -> Image {
    let filter = GaussianFilter::new(ksize, sigma);
    let planes: Vec<ImageF32> = image
        .planes()
        .iter()
        .map(|plane| separable_convolve(plane, &filter))
        .collect();
    Image::from_planes(&planes).to_bgr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_are_normalised_and_symmetric() {
        for ksize in [3, 5, 9, 15] {
            let taps = gaussian_taps(ksize, 0.0);
            assert_eq!(taps.len(), ksize);
            assert!((taps.iter().sum::<f32>() - 1.0).abs() < 1e-5);
            for i in 0..ksize / 2 {
                assert!((taps[i] - taps[ksize - 1 - i]).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn derived_sigma_for_fifteen_taps_peaks_at_centre() {
        let taps = gaussian_taps(15, 0.0);
        let centre = taps[7];
        assert!(taps.iter().all(|&t| t <= centre));
        // sigma = 2.6 for a 15-tap kernel
        let expected_ratio = (-1.0f32 / (2.0 * 2.6 * 2.6)).exp();
        assert!((taps[8] / centre - expected_ratio).abs() < 1e-4);
    }

    #[test]
    fn blur_spreads_an_impulse() {
        let mut plane = ImageF32::new(9, 9);
        plane.set(4, 4, 160.0);
        let out = separable_convolve(&plane, &GaussianFilter::new(3, 0.0));
        assert!((out.get(4, 4) - 40.0).abs() < 1e-4);
        assert!((out.get(3, 4) - 20.0).abs() < 1e-4);
        assert!((out.get(3, 3) - 10.0).abs() < 1e-4);
        assert!((out.data.iter().sum::<f32>() - 160.0).abs() < 1e-3);
    }
}
