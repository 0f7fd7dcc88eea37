//! Row access shared by float planes and interleaved 8-bit images.
//!
//! A row holds `width * channels` samples, channels interleaved per pixel.

pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Samples per pixel.
    fn channels(&self) -> usize {
        1
    }

    fn row(&self, y: usize) -> &[Self::Pixel];

    /// The `channels()` samples of pixel (x, y).
    fn samples(&self, x: usize, y: usize) -> &[Self::Pixel] {
        let c = self.channels();
        &self.row(y)[x * c..(x + 1) * c]
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}

/// Top-to-bottom row iterator.
pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        (self.y < self.image.height()).then(|| {
            self.y += 1;
            self.image.row(self.y - 1)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.image.height().saturating_sub(self.y);
        (left, Some(left))
    }
}
