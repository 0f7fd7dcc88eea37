//! Bilateral filter
//!
//! Edge-preserving smoothing: every output sample is a weighted mean of a
//! circular neighbourhood, weighted by spatial distance and by colour
//! distance (L1 over channels) to the centre pixel.
use crate::image::{Image, ImageView};
use crate::kernel::clamp_index;
use rayon::prelude::*;

/// Filter with neighbourhood `diameter` and Gaussian falloffs `sigma_color`
/// (intensity units) and `sigma_space` (pixels).
pub fn bilateral_filter(image: &Image, diameter: usize, sigma_color: f32, sigma_space: f32) -> Image {
    let (w, h, channels) = (image.width(), image.height(), image.channels());
    if w == 0 || h == 0 {
        return image.to_bgr();
    }
    let radius = (diameter / 2).max(1) as isize;
    let color_coeff = -0.5 / (sigma_color * sigma_color).max(f32::EPSILON);
    let space_coeff = -0.5 / (sigma_space * sigma_space).max(f32::EPSILON);

    // Circular support with precomputed spatial weights.
    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f32;
            if r2.sqrt() > radius as f32 {
                continue;
            }
            offsets.push((dx, dy, (r2 * space_coeff).exp()));
        }
    }
    let color_lut: Vec<f32> = (0..=255 * channels)
        .map(|d| ((d * d) as f32 * color_coeff).exp())
        .collect();

    let mut data = vec![0u8; image.as_bytes().len()];
    data.par_chunks_mut(w * channels)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let mut acc = vec![0.0f32; channels];
            for x in 0..w {
                let centre = image.samples(x, y);
                acc.iter_mut().for_each(|a| *a = 0.0);
                let mut weight_sum = 0.0f32;
                for &(dx, dy, space_weight) in &offsets {
                    let sx = clamp_index(x as isize + dx, w);
                    let sy = clamp_index(y as isize + dy, h);
                    let neighbour = image.samples(sx, sy);
                    let diff: usize = neighbour
                        .iter()
                        .zip(centre)
                        .map(|(&a, &b)| (a as i32 - b as i32).unsigned_abs() as usize)
                        .sum();
                    let weight = space_weight * color_lut[diff];
                    for (a, &v) in acc.iter_mut().zip(neighbour) {
                        *a += weight * v as f32;
                    }
                    weight_sum += weight;
                }
                for (c, a) in acc.iter().enumerate() {
                    dst_row[x * channels + c] = (a / weight_sum).round().clamp(0.0, 255.0) as u8;
                }
            }
        });

    match Image::from_raw(w, h, channels, data) {
        Ok(filtered) => filtered.to_bgr(),
        Err(_) => image.to_bgr(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharp_step_survives_while_flat_noise_is_smoothed() {
        let (w, h) = (16, 8);
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let base = if x < 8 { 20 } else { 230 };
                let jitter = if (x + y) % 2 == 0 { 4 } else { 0 };
                data.push(base + jitter);
            }
        }
        let img = Image::from_raw(w, h, 1, data).unwrap();
        let out = bilateral_filter(&img, 9, 75.0, 75.0);
        assert_eq!(out.channels(), 3);
        let left = out.pixel(3, 4)[0];
        let right = out.pixel(12, 4)[0];
        assert!((20..=24).contains(&left), "left {left}");
        assert!((230..=234).contains(&right), "right {right}");
        // adjacent jittered samples end up closer than the raw 4-level gap
        let a = out.pixel(3, 4)[0] as i32;
        let b = out.pixel(4, 4)[0] as i32;
        assert!((a - b).abs() < 4);
    }
}
