//! First-derivative magnitude operators.
use crate::edges::{image_gradients, GradientKernel};
use crate::image::{Image, ImageF32};

fn gradient_magnitude(image: &Image, kernel: GradientKernel) -> Image {
    let plane = ImageF32::from_luma(&image.to_luma());
    Image::from_plane(&image_gradients(&plane, kernel).mag)
}

pub fn sobel(image: &Image) -> Image {
    gradient_magnitude(image, GradientKernel::Sobel)
}

pub fn roberts(image: &Image) -> Image {
    gradient_magnitude(image, GradientKernel::Roberts)
}

pub fn prewitt(image: &Image) -> Image {
    gradient_magnitude(image, GradientKernel::Prewitt)
}

pub fn scharr(image: &Image) -> Image {
    gradient_magnitude(image, GradientKernel::Scharr)
}
