//! Per-channel median filter over a square window.
use crate::image::{Image, ImageView};
use crate::kernel::clamp_index;
use rayon::prelude::*;

/// Replace every sample by the median of its `ksize × ksize` neighbourhood
/// in the same channel. Border samples are replicated.
pub fn median_filter(image: &Image, ksize: usize) -> Image {
    let (w, h, channels) = (image.width(), image.height(), image.channels());
    let radius = (ksize / 2) as isize;
    let mut data = vec![0u8; image.as_bytes().len()];
    if w == 0 || h == 0 {
        return image.to_bgr();
    }

    data.par_chunks_mut(w * channels)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let mut window = Vec::with_capacity(ksize * ksize);
            for x in 0..w {
                for c in 0..channels {
                    window.clear();
                    for dy in -radius..=radius {
                        let row = image.row(clamp_index(y as isize + dy, h));
                        for dx in -radius..=radius {
                            let sx = clamp_index(x as isize + dx, w);
                            window.push(row[sx * channels + c]);
                        }
                    }
                    let mid = window.len() / 2;
                    let (_, median, _) = window.select_nth_unstable(mid);
                    dst_row[x * channels + c] = *median;
                }
            }
        });

    match Image::from_raw(w, h, channels, data) {
        Ok(filtered) => filtered.to_bgr(),
        Err(_) => image.to_bgr(),
    }
}
