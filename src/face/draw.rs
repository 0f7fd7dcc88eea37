//! Minimal raster drawing on 3-channel images: filled and outlined
//! rectangles, and text in a built-in 5×7 bitmap font.
use crate::image::Image;

const GLYPH_W: i64 = 5;
const GLYPH_H: i64 = 7;
/// Font dots per unit of text scale.
const DOTS_PER_SCALE: f32 = 3.0;

// Rows top to bottom, bit 4 is the leftmost column.
const UPPER: [[u8; 7]; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
];

const HOLLOW: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

fn glyph(c: char) -> Option<[u8; 7]> {
    let lower = match c {
        ' ' => return None,
        'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
        'c' => [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E],
        'd' => [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F],
        'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        'f' => [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08],
        'o' => [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E],
        's' => [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E],
        't' => [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06],
        _ => {
            let upper = c.to_ascii_uppercase();
            return Some(if upper.is_ascii_uppercase() {
                UPPER[(upper as u8 - b'A') as usize]
            } else {
                HOLLOW
            });
        }
    };
    Some(lower)
}

/// Fill the inclusive rectangle `[x0, x1] × [y0, y1]`, clipped to the image.
pub fn fill_rect(image: &mut Image, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 3]) {
    let (w, h) = (image.width() as i64, image.height() as i64);
    let (x0, x1) = (x0.max(0), x1.min(w - 1));
    let (y0, y1) = (y0.max(0), y1.min(h - 1));
    if x0 > x1 || y0 > y1 {
        return;
    }
    for y in y0..=y1 {
        for x in x0..=x1 {
            image.put_pixel(x as usize, y as usize, &color);
        }
    }
}

/// Outline with corners `(x, y)` and `(right, bottom)`, `thickness` pixels
/// wide and centred on the edge lines.
pub fn draw_rect_outline(
    image: &mut Image,
    x: i64,
    y: i64,
    right: i64,
    bottom: i64,
    color: [u8; 3],
    thickness: u32,
) {
    let t = thickness.max(1) as i64;
    let lo = (t - 1) / 2;
    let hi = t / 2;
    fill_rect(image, x - lo, y - lo, right + hi, y + hi, color);
    fill_rect(image, x - lo, bottom - lo, right + hi, bottom + hi, color);
    fill_rect(image, x - lo, y - lo, x + hi, bottom + hi, color);
    fill_rect(image, right - lo, y - lo, right + hi, bottom + hi, color);
}

/// Size of one font dot in pixels at `scale`.
pub fn dot_size(scale: f32) -> i64 {
    ((DOTS_PER_SCALE * scale).round() as i64).max(1)
}

/// Draw `text` with its baseline-left corner at `(x, y)`.
pub fn draw_text(image: &mut Image, text: &str, x: i64, y: i64, scale: f32, color: [u8; 3]) {
    let dot = dot_size(scale);
    let top = y - GLYPH_H * dot;
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let left = x + i as i64 * (GLYPH_W + 1) * dot;
        for (ry, bits) in rows.iter().enumerate() {
            for rx in 0..GLYPH_W {
                if bits & (0x10 >> rx) == 0 {
                    continue;
                }
                let px = left + rx * dot;
                let py = top + ry as i64 * dot;
                fill_rect(image, px, py, px + dot - 1, py + dot - 1, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [0, 0, 255];

    fn count(image: &Image, color: [u8; 3]) -> usize {
        image
            .as_bytes()
            .chunks_exact(3)
            .filter(|px| *px == color)
            .count()
    }

    #[test]
    fn outline_is_three_pixels_wide_and_hollow() {
        let mut img = Image::filled(40, 40, [0, 0, 0]).unwrap();
        draw_rect_outline(&mut img, 10, 10, 30, 30, [0, 255, 0], 3);
        assert_eq!(img.pixel(9, 20), &[0, 255, 0]);
        assert_eq!(img.pixel(11, 20), &[0, 255, 0]);
        assert_eq!(img.pixel(12, 20), &[0, 0, 0]);
        assert_eq!(img.pixel(8, 20), &[0, 0, 0]);
        assert_eq!(img.pixel(20, 20), &[0, 0, 0]);
    }

    #[test]
    fn drawing_off_image_is_clipped() {
        let mut img = Image::filled(10, 10, [0, 0, 0]).unwrap();
        draw_rect_outline(&mut img, -5, -5, 4, 4, RED, 3);
        draw_text(&mut img, "Face", 8, 2, 1.0, RED);
        assert!(count(&img, RED) > 0);
    }

    #[test]
    fn text_sits_above_the_baseline() {
        let mut img = Image::filled(80, 40, [0, 0, 0]).unwrap();
        draw_text(&mut img, "T", 10, 30, 1.0, RED);
        // top bar of the T spans the first glyph row, 21 px above the baseline
        assert_eq!(img.pixel(10, 9), &RED);
        assert_eq!(img.pixel(10, 30), &[0, 0, 0]);
        // stem: centre column, 3 px wide
        assert_eq!(img.pixel(16, 28), &RED);
        assert_eq!(count(&img, RED), (5 + 6) * 9);
    }
}
