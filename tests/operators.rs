mod common;

use common::init_logging;
use common::synthetic_image::{textured_bgr, uniform_gray, vertical_step};
use vision_lab::ops::otsu_threshold;
use vision_lab::{Image, Operator, OperatorCatalog, VisionError};

const IMAGE_OPERATORS: [&str; 11] = [
    "canny",
    "laplacian",
    "sobel",
    "roberts",
    "prewitt",
    "scharr",
    "otsu",
    "log",
    "gaussian-blur",
    "bilateral",
    "median",
];

#[test]
fn every_operator_keeps_size_and_returns_three_channels() {
    init_logging();
    let catalog = OperatorCatalog::new();
    let inputs = [textured_bgr(37, 23), vertical_step(20, 11, 9, 30, 220)];
    for input in &inputs {
        for name in IMAGE_OPERATORS {
            let out = catalog
                .apply(name, input)
                .unwrap_or_else(|e| panic!("{name} failed: {e}"));
            assert_eq!(out.width(), input.width(), "{name} width");
            assert_eq!(out.height(), input.height(), "{name} height");
            assert_eq!(out.channels(), 3, "{name} channels");
        }
    }
}

#[test]
fn operators_do_not_mutate_their_input() {
    let catalog = OperatorCatalog::new();
    let input = textured_bgr(16, 16);
    let copy = input.clone();
    for name in IMAGE_OPERATORS {
        catalog.apply(name, &input).unwrap();
    }
    assert_eq!(input, copy);
}

#[test]
fn otsu_output_is_binary() {
    let catalog = OperatorCatalog::new();
    let out = catalog.apply("otsu", &textured_bgr(40, 30)).unwrap();
    assert!(out.as_bytes().iter().all(|&v| v == 0 || v == 255));
    assert!(out.as_bytes().contains(&0));
    assert!(out.as_bytes().contains(&255));
}

#[test]
fn otsu_threshold_splits_bimodal_histogram() {
    let img = vertical_step(10, 10, 5, 20, 200);
    let t = otsu_threshold(&img.to_luma());
    assert!(t > 20 && t < 200, "threshold {t}");
}

#[test]
fn smoothing_fixes_uniform_images() {
    let catalog = OperatorCatalog::new();
    let flat = Image::filled(19, 13, [12, 99, 201]).unwrap();
    for name in ["median", "gaussian-blur", "bilateral"] {
        assert_eq!(catalog.apply(name, &flat).unwrap(), flat, "{name}");
    }
}

#[test]
fn derivative_operators_vanish_on_uniform_images() {
    let catalog = OperatorCatalog::new();
    let flat = uniform_gray(15, 9, 140);
    for name in ["sobel", "roberts", "prewitt", "scharr", "laplacian", "log", "canny"] {
        let out = catalog.apply(name, &flat).unwrap();
        assert!(out.as_bytes().iter().all(|&v| v == 0), "{name}");
    }
}

#[test]
fn canny_marks_one_column_on_a_step_edge() {
    let (w, h, split) = (24, 16, 12);
    let catalog = OperatorCatalog::new();
    let out = catalog.apply("canny", &vertical_step(w, h, split, 0, 255)).unwrap();
    for y in 0..h {
        for x in 0..w {
            let expected = if x == split - 1 { 255 } else { 0 };
            assert_eq!(out.pixel(x, y), &[expected; 3], "pixel ({x}, {y})");
        }
    }
}

#[test]
fn gradient_responds_along_the_step() {
    let catalog = OperatorCatalog::new();
    let step = vertical_step(16, 8, 8, 50, 150);
    for name in ["sobel", "prewitt", "scharr"] {
        let out = catalog.apply(name, &step).unwrap();
        assert_eq!(out.pixel(7, 4)[0], 255, "{name}");
        assert_eq!(out.pixel(2, 4)[0], 0, "{name}");
    }
    let roberts = catalog.apply("roberts", &step).unwrap();
    // both diagonal differences are 100
    assert_eq!(roberts.pixel(8, 4)[0], 141);
}

#[test]
fn second_derivatives_peak_on_both_sides_of_the_step() {
    let catalog = OperatorCatalog::new();
    let step = vertical_step(16, 8, 8, 50, 150);
    let laplacian = catalog.apply("laplacian", &step).unwrap();
    let log = catalog.apply("log", &step).unwrap();
    for y in 0..8 {
        assert_eq!(laplacian.pixel(7, y)[0], 100, "row {y}");
        assert_eq!(laplacian.pixel(8, y)[0], 100, "row {y}");
        assert_eq!(laplacian.pixel(2, y)[0], 0, "row {y}");
        assert_eq!(laplacian.pixel(13, y)[0], 0, "row {y}");
    }
    // smoothing spreads the step to 50, 75, 125, 150 across columns 6..=9
    for x in 6..=9 {
        assert_eq!(log.pixel(x, 4)[0], 25, "column {x}");
    }
    assert!(log.pixel(7, 4)[0] < laplacian.pixel(7, 4)[0]);
    assert_eq!(log.pixel(2, 4)[0], 0);
    assert_eq!(log.pixel(13, 4)[0], 0);
}

#[test]
fn unknown_operator_is_reported() {
    let catalog = OperatorCatalog::new();
    let err = catalog
        .apply("not-a-real-operator", &uniform_gray(4, 4, 0))
        .unwrap_err();
    assert_eq!(err, VisionError::UnknownOperator("not-a-real-operator".to_string()));
    assert!("Sobel".parse::<Operator>().is_err());
}

#[test]
fn invalid_images_are_rejected() {
    let catalog = OperatorCatalog::new();
    assert!(matches!(
        catalog.apply("sobel", &Image::default()),
        Err(VisionError::InvalidImage(_))
    ));
    let rgba = Image::from_raw(3, 3, 4, vec![0; 36]).unwrap();
    assert!(matches!(
        catalog.apply("median", &rgba),
        Err(VisionError::InvalidImage(_))
    ));
}

#[test]
fn face_detection_without_cascade_is_unavailable() {
    let catalog = OperatorCatalog::new();
    assert!(matches!(
        catalog.apply("face-detection", &uniform_gray(32, 32, 0)),
        Err(VisionError::ClassifierUnavailable(_))
    ));
}

#[test]
fn apply_many_matches_sequential_results() {
    init_logging();
    let catalog = OperatorCatalog::new();
    let frames: Vec<Image> = (0..6).map(|i| textured_bgr(20 + i, 14)).collect();
    let results = catalog.apply_many("log", &frames);
    assert_eq!(results.len(), frames.len());
    for (frame, result) in frames.iter().zip(&results) {
        assert_eq!(result.as_ref().unwrap(), &catalog.apply("log", frame).unwrap());
    }

    let failed = catalog.apply_many("sharpen", &frames);
    assert!(failed
        .iter()
        .all(|r| matches!(r, Err(VisionError::UnknownOperator(_)))));
}
