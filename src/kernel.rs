//! Small fixed-size convolution kernels and their application to planes.
//!
//! Kernels are applied as correlation (no flip) with the anchor at `N / 2`,
//! which for the 2×2 Roberts pair means the bottom-right tap sits on the
//! output pixel. Border samples are replicated by clamping indices.
use crate::image::{ImageF32, ImageView};
use nalgebra::{Matrix2, Matrix3, SMatrix, Vector3};
use rayon::prelude::*;

/// Square kernel of signed weights.
pub type Kernel<const N: usize> = SMatrix<f32, N, N>;

pub fn roberts_x() -> Kernel<2> {
    Matrix2::new(1.0, 0.0, 0.0, -1.0)
}

pub fn roberts_y() -> Kernel<2> {
    Matrix2::new(0.0, 1.0, -1.0, 0.0)
}

pub fn prewitt_x() -> Kernel<3> {
    Matrix3::new(-1.0, 0.0, 1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0)
}

pub fn prewitt_y() -> Kernel<3> {
    prewitt_x().transpose()
}

pub fn sobel_x() -> Kernel<3> {
    Matrix3::new(-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0)
}

pub fn sobel_y() -> Kernel<3> {
    sobel_x().transpose()
}

pub fn scharr_x() -> Kernel<3> {
    Matrix3::new(-3.0, 0.0, 3.0, -10.0, 0.0, 10.0, -3.0, 0.0, 3.0)
}

pub fn scharr_y() -> Kernel<3> {
    scharr_x().transpose()
}

/// Discrete 4-neighbour Laplacian.
pub fn laplacian() -> Kernel<3> {
    Matrix3::new(0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0)
}

/// 3×3 Gaussian built as the outer product of the binomial taps `[1, 2, 1] / 4`.
pub fn gaussian3() -> Kernel<3> {
    let g = Vector3::new(0.25, 0.5, 0.25);
    g * g.transpose()
}

/// Correlate `src` with `kernel`, replicating border samples.
pub fn correlate<const N: usize>(src: &ImageF32, kernel: &Kernel<N>) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    let anchor = (N / 2) as isize;
    out.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let rows: [&[f32]; N] = std::array::from_fn(|ky| {
                src.row(clamp_index(y as isize + ky as isize - anchor, h))
            });
            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (ky, row) in rows.iter().enumerate() {
                    for kx in 0..N {
                        let sx = clamp_index(x as isize + kx as isize - anchor, w);
                        acc += kernel[(ky, kx)] * row[sx];
                    }
                }
                *dst_px = acc;
            }
        });
    out
}

pub(crate) fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, (x * 10) as f32);
            }
        }
        img
    }

    #[test]
    fn derivative_kernels_sum_to_zero() {
        for k in [sobel_x(), sobel_y(), prewitt_x(), scharr_y(), laplacian()] {
            assert!(k.sum().abs() < 1e-6);
        }
        assert!(roberts_x().sum().abs() < 1e-6);
        assert!((gaussian3().sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sobel_x_on_ramp_is_eight_times_slope() {
        let out = correlate(&ramp(6, 4), &sobel_x());
        // interior: (x+1 - (x-1)) * 10 * (1 + 2 + 1)
        assert!((out.get(2, 1) - 80.0).abs() < 1e-4);
        assert!((out.get(3, 2) - 80.0).abs() < 1e-4);
        let vertical = correlate(&ramp(6, 4), &sobel_y());
        assert!(vertical.data.iter().all(|v| v.abs() < 1e-4));
    }

    #[test]
    fn roberts_anchor_is_bottom_right() {
        let out = correlate(&ramp(4, 3), &roberts_x());
        // src(x-1, y-1) - src(x, y) on a horizontal ramp of slope 10
        assert!((out.get(2, 2) + 10.0).abs() < 1e-4);
    }
}
