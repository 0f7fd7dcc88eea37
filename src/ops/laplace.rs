//! Second-derivative operators: Laplacian and Laplacian-of-Gaussian.
use crate::image::{Image, ImageF32};
use crate::kernel::{self, correlate};

fn absolute_laplacian(plane: &ImageF32) -> Image {
    let mut response = correlate(plane, &kernel::laplacian());
    response.map_inplace(f32::abs);
    Image::from_plane(&response)
}

/// `|∇²I|` of the luminance, saturated to 8 bits.
pub fn laplacian(image: &Image) -> Image {
    absolute_laplacian(&ImageF32::from_luma(&image.to_luma()))
}

/// 3×3 Gaussian smoothing, then the Laplacian. The smoothed plane is
/// quantized to 8 bits in between, as an 8-bit blur stage would.
pub fn laplacian_of_gaussian(image: &Image) -> Image {
    let mut smoothed = correlate(
        &ImageF32::from_luma(&image.to_luma()),
        &kernel::gaussian3(),
    );
    smoothed.map_inplace(|v| v.round().clamp(0.0, 255.0));
    absolute_laplacian(&smoothed)
}
