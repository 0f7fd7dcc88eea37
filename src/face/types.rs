use crate::image::Image;
use serde::{Deserialize, Serialize};

/// Label drawn above every confirmed face.
pub const FACE_LABEL: &str = "Face";
/// Message drawn when the scan confirms nothing.
pub const NO_FACES_TEXT: &str = "No faces detected";

/// Axis-aligned integer rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 * 0.5,
            self.y as f32 + self.height as f32 * 0.5,
        )
    }

    /// Intersection with the `w × h` image area, or `None` when nothing of the
    /// box lies inside it.
    pub fn clipped_to(&self, w: u32, h: u32) -> Option<Self> {
        let right = self.right().min(w);
        let bottom = self.bottom().min(h);
        if self.x >= right || self.y >= bottom {
            return None;
        }
        Some(Self::new(self.x, self.y, right - self.x, bottom - self.y))
    }
}

/// Parameters of the multi-scale window scan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanParams {
    /// Growth factor of the window between consecutive scales (> 1).
    pub scale_factor: f32,
    /// Minimum number of overlapping raw hits a region needs to be kept.
    /// Zero keeps the raw hits ungrouped.
    pub min_neighbors: usize,
    /// Smallest window considered, (width, height).
    pub min_size: (u32, u32),
    /// Largest window considered; `None` means up to the image size.
    pub max_size: Option<(u32, u32)>,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.05,
            min_neighbors: 3,
            min_size: (20, 20),
            max_size: None,
        }
    }
}

/// One element drawn onto the annotated image. Colors are BGR.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    Box {
        bbox: BoundingBox,
        label: String,
        color: [u8; 3],
        thickness: u32,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        scale: f32,
        color: [u8; 3],
    },
}

/// Result of a face scan: the annotated copy, the confirmed regions and a
/// record of everything drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub annotated: Image,
    pub boxes: Vec<BoundingBox>,
    pub annotations: Vec<Annotation>,
}

impl Detection {
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipping_keeps_the_inside_part() {
        let b = BoundingBox::new(90, 5, 20, 10);
        assert_eq!(b.clipped_to(100, 100), Some(BoundingBox::new(90, 5, 10, 10)));
        assert_eq!(BoundingBox::new(100, 0, 5, 5).clipped_to(100, 100), None);
    }

    #[test]
    fn scan_params_fill_missing_fields_with_defaults() {
        let p: ScanParams = serde_json::from_str(r#"{ "min_neighbors": 5 }"#).unwrap();
        assert_eq!(p.min_neighbors, 5);
        assert_eq!(p.scale_factor, 1.05);
        assert_eq!(p.min_size, (20, 20));
        assert!(p.max_size.is_none());
    }
}
