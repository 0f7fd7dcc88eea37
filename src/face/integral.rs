//! Summed-area tables over an 8-bit plane.
use ::image::GrayImage;

/// Integral and squared-integral image with one row and column of zero
/// padding, so `sum[(y * (w + 1)) + x]` covers pixels `[0, x) × [0, y)`.
#[derive(Clone, Debug)]
pub struct IntegralImage {
    w: usize,
    sum: Vec<u64>,
    sq_sum: Vec<u64>,
}

impl IntegralImage {
    pub fn new(gray: &GrayImage) -> Self {
        let (w, h) = (gray.width() as usize, gray.height() as usize);
        let stride = w + 1;
        let mut sum = vec![0u64; stride * (h + 1)];
        let mut sq_sum = vec![0u64; stride * (h + 1)];
        let raw = gray.as_raw();
        for y in 0..h {
            let mut row_sum = 0u64;
            let mut row_sq = 0u64;
            for x in 0..w {
                let v = raw[y * w + x] as u64;
                row_sum += v;
                row_sq += v * v;
                let i = (y + 1) * stride + x + 1;
                sum[i] = sum[i - stride] + row_sum;
                sq_sum[i] = sq_sum[i - stride] + row_sq;
            }
        }
        Self { w, sum, sq_sum }
    }

    /// Sum of pixels in `[x, x + w) × [y, y + h)`. The rectangle must lie
    /// inside the image.
    #[inline]
    pub fn rect_sum(&self, x: usize, y: usize, w: usize, h: usize) -> u64 {
        Self::lookup(&self.sum, self.w + 1, x, y, w, h)
    }

    #[inline]
    pub fn rect_sq_sum(&self, x: usize, y: usize, w: usize, h: usize) -> u64 {
        Self::lookup(&self.sq_sum, self.w + 1, x, y, w, h)
    }

    #[inline]
    fn lookup(table: &[u64], stride: usize, x: usize, y: usize, w: usize, h: usize) -> u64 {
        let a = table[y * stride + x];
        let b = table[y * stride + x + w];
        let c = table[(y + h) * stride + x];
        let d = table[(y + h) * stride + x + w];
        (d + a) - (b + c)
    }
}
