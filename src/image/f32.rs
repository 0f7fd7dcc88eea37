//! Owned single-channel f32 plane, rows packed back to back.
//!
//! Holds intermediate responses of the operators (signed derivatives,
//! magnitudes, smoothed channels) on the 0–255 intensity scale.
use super::traits::{ImageView, ImageViewMut};
use ::image::GrayImage;

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Lift an 8-bit gray plane to floats without rescaling.
    pub fn from_luma(gray: &GrayImage) -> Self {
        Self {
            w: gray.width() as usize,
            h: gray.height() as usize,
            data: gray.as_raw().iter().map(|&v| v as f32).collect(),
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[y * self.w + x] = v;
    }

    /// Apply `f` to every sample in place.
    pub fn map_inplace(&mut self, f: impl Fn(f32) -> f32) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Quantize to 8 bits: round to nearest and saturate into `[0, 255]`.
    pub fn to_luma(&self) -> GrayImage {
        let data = self.data.iter().map(|&v| saturate_u8(v)).collect();
        GrayImage::from_raw(self.w as u32, self.h as u32, data)
            .unwrap_or_else(|| GrayImage::new(self.w as u32, self.h as u32))
    }
}

#[inline]
pub(crate) fn saturate_u8(v: f32) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.round().clamp(0.0, 255.0) as u8
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.w..(y + 1) * self.w]
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        &mut self.data[y * self.w..(y + 1) * self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_rounds_and_saturates() {
        let mut plane = ImageF32::new(4, 1);
        plane.data.copy_from_slice(&[-3.0, 12.4, 12.6, 900.0]);
        assert_eq!(plane.to_luma().as_raw(), &vec![0, 12, 13, 255]);
    }
}
