//! Owned 8-bit image with interleaved channels.
//!
//! `Image` is the buffer every operator consumes and produces. Inputs may be
//! single-channel gray or 3-channel color; color samples are stored in BGR
//! order so the display side has exactly one conversion rule. Operators never
//! mutate their input and always hand back a 3-channel image.
use super::{ImageF32, ImageView};
use crate::error::{Result, VisionError};
use ::image::{GrayImage, RgbImage};

/// Channel counts accepted by the operators.
pub const SUPPORTED_CHANNELS: [usize; 2] = [1, 3];

// BT.601 luma weights in Q14 fixed point (B, G, R).
const LUMA_B: u32 = 1868;
const LUMA_G: u32 = 9617;
const LUMA_R: u32 = 4899;
const LUMA_SHIFT: u32 = 14;

/// `w * h * channels`, or `InvalidImage` when it does not fit in `usize`.
fn sample_count(w: usize, h: usize, channels: usize) -> Result<usize> {
    w.checked_mul(h)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            VisionError::InvalidImage(format!("{w}x{h}x{channels} exceeds addressable memory"))
        })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    w: usize,
    h: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Image {
    /// Wrap raw interleaved bytes. Only the buffer length is checked here;
    /// dimension and channel support is checked by [`Image::validate`].
    pub fn from_raw(w: usize, h: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        let expected = sample_count(w, h, channels)?;
        if data.len() != expected {
            return Err(VisionError::InvalidImage(format!(
                "buffer holds {} bytes, expected {expected} for {w}x{h}x{channels}",
                data.len()
            )));
        }
        Ok(Self {
            w,
            h,
            channels,
            data,
        })
    }

    /// Uniform 3-channel image filled with a BGR color.
    pub fn filled(w: usize, h: usize, bgr: [u8; 3]) -> Result<Self> {
        let len = sample_count(w, h, 3)?;
        let data = bgr.iter().copied().cycle().take(len).collect();
        Ok(Self {
            w,
            h,
            channels: 3,
            data,
        })
    }

    /// Single-channel image backed by a copy of `gray`.
    pub fn from_luma(gray: &GrayImage) -> Self {
        Self {
            w: gray.width() as usize,
            h: gray.height() as usize,
            channels: 1,
            data: gray.as_raw().clone(),
        }
    }

    /// Import an RGB buffer from the `image` crate, reordering to BGR.
    pub fn from_rgb_image(rgb: &RgbImage) -> Self {
        let mut data = rgb.as_raw().clone();
        for px in data.chunks_exact_mut(3) {
            px.swap(0, 2);
        }
        Self {
            w: rgb.width() as usize,
            h: rgb.height() as usize,
            channels: 3,
            data,
        }
    }

    /// Export as RGB for display or encoding.
    pub fn to_rgb_image(&self) -> RgbImage {
        let bgr = self.to_bgr();
        let mut data = bgr.data;
        for px in data.chunks_exact_mut(3) {
            px.swap(0, 2);
        }
        RgbImage::from_raw(self.w as u32, self.h as u32, data)
            .unwrap_or_else(|| RgbImage::new(self.w as u32, self.h as u32))
    }

    /// 3-channel image whose channels all carry the plane, quantized to 8 bits.
    pub fn from_plane(plane: &ImageF32) -> Self {
        let mut data = Vec::with_capacity(plane.w * plane.h * 3);
        for row in plane.rows() {
            for &v in row {
                let q = super::f32::saturate_u8(v);
                data.extend_from_slice(&[q, q, q]);
            }
        }
        Self {
            w: plane.w,
            h: plane.h,
            channels: 3,
            data,
        }
    }

    /// Interleave per-channel planes (all of the same size) into one image.
    pub fn from_planes(planes: &[ImageF32]) -> Self {
        let (w, h) = planes.first().map(|p| (p.w, p.h)).unwrap_or((0, 0));
        let channels = planes.len();
        let mut data = vec![0u8; w * h * channels];
        for (c, plane) in planes.iter().enumerate() {
            for (i, &v) in plane.data.iter().enumerate() {
                data[i * channels + c] = super::f32::saturate_u8(v);
            }
        }
        Self {
            w,
            h,
            channels,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Samples of the pixel at (x, y), one per channel.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        self.samples(x, y)
    }

    /// Overwrite the pixel at (x, y); `value` must carry one sample per channel.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, value: &[u8]) {
        let start = (y * self.w + x) * self.channels;
        self.data[start..start + self.channels].copy_from_slice(value);
    }

    /// Reject empty images and channel counts other than 1 or 3.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(VisionError::InvalidImage(format!(
                "image is empty ({}x{})",
                self.w, self.h
            )));
        }
        if !SUPPORTED_CHANNELS.contains(&self.channels) {
            return Err(VisionError::InvalidImage(format!(
                "unsupported channel count {} (expected 1 or 3)",
                self.channels
            )));
        }
        Ok(())
    }

    /// Luminance plane. Gray input is copied, BGR input is weighted with BT.601.
    pub fn to_luma(&self) -> GrayImage {
        let data: Vec<u8> = match self.channels {
            3 => self
                .data
                .chunks_exact(3)
                .map(|px| {
                    let acc = px[0] as u32 * LUMA_B
                        + px[1] as u32 * LUMA_G
                        + px[2] as u32 * LUMA_R
                        + (1 << (LUMA_SHIFT - 1));
                    (acc >> LUMA_SHIFT) as u8
                })
                .collect(),
            _ => self
                .data
                .chunks_exact(self.channels.max(1))
                .map(|px| px[0])
                .collect(),
        };
        GrayImage::from_raw(self.w as u32, self.h as u32, data)
            .unwrap_or_else(|| GrayImage::new(self.w as u32, self.h as u32))
    }

    /// 3-channel copy; gray samples are replicated across B, G and R.
    pub fn to_bgr(&self) -> Image {
        if self.channels == 3 {
            return self.clone();
        }
        let mut data = Vec::with_capacity(self.w * self.h * 3);
        for px in self.data.chunks_exact(self.channels.max(1)) {
            data.extend_from_slice(&[px[0], px[0], px[0]]);
        }
        Image {
            w: self.w,
            h: self.h,
            channels: 3,
            data,
        }
    }

    /// Split channel `c` into a float plane.
    pub fn plane(&self, c: usize) -> ImageF32 {
        let mut out = ImageF32::new(self.w, self.h);
        for (dst, px) in out
            .data
            .iter_mut()
            .zip(self.data.chunks_exact(self.channels.max(1)))
        {
            *dst = px[c] as f32;
        }
        out
    }

    /// All channels as float planes.
    pub fn planes(&self) -> Vec<ImageF32> {
        (0..self.channels).map(|c| self.plane(c)).collect()
    }
}

impl ImageView for Image {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let len = self.w * self.channels;
        &self.data[y * len..(y + 1) * len]
    }
}
