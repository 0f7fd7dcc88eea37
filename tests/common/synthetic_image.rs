use std::sync::Arc;
use vision_lab::face::{CascadeStage, HaarCascade, HaarRect, WeakClassifier};
use vision_lab::Image;

/// Uniform single-channel image.
pub fn uniform_gray(width: usize, height: usize, value: u8) -> Image {
    Image::from_raw(width, height, 1, vec![value; width * height]).expect("valid buffer")
}

/// Gray image, `dark` left of column `split` and `bright` from it on.
pub fn vertical_step(width: usize, height: usize, split: usize, dark: u8, bright: u8) -> Image {
    let mut data = Vec::with_capacity(width * height);
    for _ in 0..height {
        for x in 0..width {
            data.push(if x < split { dark } else { bright });
        }
    }
    Image::from_raw(width, height, 1, data).expect("valid buffer")
}

/// Color image with a smooth gradient in every channel plus a checker texture.
pub fn textured_bgr(width: usize, height: usize) -> Image {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let checker = if (x / 4 + y / 4) % 2 == 0 { 40 } else { 0 };
            data.push(((x * 255) / width.max(1)) as u8);
            data.push(((y * 255) / height.max(1)) as u8);
            data.push((60 + checker + (x + y) % 16) as u8);
        }
    }
    Image::from_raw(width, height, 3, data).expect("valid buffer")
}

/// Black BGR image with one white `side × side` square at (`at`, `at`),
/// the pattern the test cascade responds to.
pub fn face_pattern(size: usize, at: usize, side: usize) -> Image {
    let mut img = Image::filled(size, size, [0, 0, 0]).expect("valid size");
    for y in at..at + side {
        for x in at..at + side {
            img.put_pixel(x, y, &[255, 255, 255]);
        }
    }
    img
}

/// 24×24 single-stage cascade firing on a bright centre over a dark surround.
pub fn centre_surround_cascade() -> HaarCascade {
    HaarCascade {
        window: (24, 24),
        stages: vec![CascadeStage {
            threshold: 0.0,
            weak: vec![WeakClassifier {
                rects: vec![
                    HaarRect {
                        x: 0,
                        y: 0,
                        w: 24,
                        h: 24,
                        weight: -1.0,
                    },
                    HaarRect {
                        x: 6,
                        y: 6,
                        w: 12,
                        h: 12,
                        weight: 4.0,
                    },
                ],
                threshold: 1.0,
                left: -1.0,
                right: 1.0,
            }],
        }],
    }
}

pub fn shared_cascade() -> Arc<HaarCascade> {
    Arc::new(centre_surround_cascade())
}

/// The centre-surround cascade in OpenCV's trained-cascade XML layout.
pub fn centre_surround_opencv_xml() -> &'static str {
    r#"<?xml version="1.0"?>
<opencv_storage>
<cascade type_id="opencv-cascade-classifier"><stageType>BOOST</stageType>
  <featureType>HAAR</featureType>
  <height>24</height>
  <width>24</width>
  <stageNum>1</stageNum>
  <stages>
    <_>
      <maxWeakCount>1</maxWeakCount>
      <stageThreshold>0.</stageThreshold>
      <weakClassifiers>
        <_>
          <internalNodes>
            0 -1 0 1.</internalNodes>
          <leafValues>
            -1. 1.</leafValues></_></weakClassifiers></_></stages>
  <features>
    <_>
      <rects>
        <_>
          0 0 24 24 -1.</_>
        <_>
          6 6 12 12 4.</_></rects></_></features></cascade>
</opencv_storage>
"#
}
