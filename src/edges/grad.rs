//! Image gradients for the four first-derivative kernel pairs.
//!
//! Each pair is correlated with the plane, then combined as
//! `mag = sqrt(gx^2 + gy^2)`. Complexity: O(W·H·k²) per pass.
use crate::image::ImageF32;
use crate::kernel::{self, correlate};

/// Kernel pair used to estimate the horizontal and vertical derivatives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientKernel {
    Sobel,
    /// Better rotational symmetry than Sobel.
    Scharr,
    /// Uniform ±1 weights, no centre emphasis.
    Prewitt,
    /// 2×2 diagonal differences.
    Roberts,
}

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative (correlation with kernel X)
    pub gx: ImageF32,
    /// Vertical derivative (correlation with kernel Y)
    pub gy: ImageF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: ImageF32,
}

impl Grad {
    /// `|gx| + |gy|` per pixel, the magnitude Canny thresholds against.
    pub fn l1_magnitude(&self) -> ImageF32 {
        let mut out = ImageF32::new(self.gx.w, self.gx.h);
        for ((dst, &gx), &gy) in out.data.iter_mut().zip(&self.gx.data).zip(&self.gy.data) {
            *dst = gx.abs() + gy.abs();
        }
        out
    }
}

/// Compute the derivative pair and magnitude of a single-channel plane.
pub fn image_gradients(l: &ImageF32, kernel: GradientKernel) -> Grad {
    let (gx, gy) = match kernel {
        GradientKernel::Sobel => (
            correlate(l, &kernel::sobel_x()),
            correlate(l, &kernel::sobel_y()),
        ),
        GradientKernel::Scharr => (
            correlate(l, &kernel::scharr_x()),
            correlate(l, &kernel::scharr_y()),
        ),
        GradientKernel::Prewitt => (
            correlate(l, &kernel::prewitt_x()),
            correlate(l, &kernel::prewitt_y()),
        ),
        GradientKernel::Roberts => (
            correlate(l, &kernel::roberts_x()),
            correlate(l, &kernel::roberts_y()),
        ),
    };

    let mut mag = ImageF32::new(l.w, l.h);
    for ((dst, &x), &y) in mag.data.iter_mut().zip(&gx.data).zip(&gy.data) {
        *dst = (x * x + y * y).sqrt();
    }

    Grad { gx, gy, mag }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_plane_has_no_gradient() {
        let mut flat = ImageF32::new(8, 8);
        flat.map_inplace(|_| 128.0);
        for k in [
            GradientKernel::Sobel,
            GradientKernel::Scharr,
            GradientKernel::Prewitt,
            GradientKernel::Roberts,
        ] {
            let grad = image_gradients(&flat, k);
            assert!(grad.mag.data.iter().all(|&m| m == 0.0), "{k:?}");
        }
    }

    #[test]
    fn scharr_weights_centre_row_more_than_sobel() {
        let mut step = ImageF32::new(5, 5);
        for y in 0..5 {
            for x in 3..5 {
                step.set(x, y, 1.0);
            }
        }
        let sobel = image_gradients(&step, GradientKernel::Sobel);
        let scharr = image_gradients(&step, GradientKernel::Scharr);
        assert!((sobel.gx.get(2, 2) - 4.0).abs() < 1e-6);
        assert!((scharr.gx.get(2, 2) - 16.0).abs() < 1e-6);
        assert!((sobel.l1_magnitude().get(2, 2) - 4.0).abs() < 1e-6);
    }
}
