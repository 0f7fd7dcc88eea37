//! `vision-lab <config.json>`: apply one catalog operator to an image file.
//!
//! ```json
//! {
//!   "input": "photo.jpg",
//!   "operator": "face-detection",
//!   "output": "out/faces.png",
//!   "cascade": "cascades/frontal_face.json",
//!   "params": { "face": { "min_neighbors": 4 } },
//!   "report_json": "out/faces.json"
//! }
//! ```
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;
use vision_lab::config::load_config;
use vision_lab::face::{Annotation, BoundingBox};
use vision_lab::image::io::{load_color_image, save_color_image, write_json_file};
use vision_lab::{FaceLocator, Operator, OperatorCatalog};

#[derive(Debug, Serialize)]
struct RunReport {
    input: PathBuf,
    operator: String,
    width: usize,
    height: usize,
    latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    boxes: Option<Vec<BoundingBox>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotations: Option<Vec<Annotation>>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let operator = config
        .operator
        .parse::<Operator>()
        .map_err(|e| e.to_string())?;
    let mut catalog = OperatorCatalog::with_params(config.params).map_err(|e| e.to_string())?;
    if let Some(cascade) = &config.cascade {
        let locator = FaceLocator::from_cascade_file(cascade).map_err(|e| e.to_string())?;
        catalog = catalog.with_face_locator(locator);
    }

    let image = load_color_image(&config.input)?;
    let start = Instant::now();
    let (output, boxes, annotations) = if operator == Operator::FaceDetection {
        let detection = catalog.detect(&image).map_err(|e| e.to_string())?;
        println!("faces={}", detection.boxes.len());
        (
            detection.annotated,
            Some(detection.boxes),
            Some(detection.annotations),
        )
    } else {
        let out = catalog
            .apply_operator(operator, &image)
            .map_err(|e| e.to_string())?;
        (out, None, None)
    };
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    save_color_image(&output, &config.output)?;
    println!(
        "{} {}x{} latency_ms={latency_ms:.3} -> {}",
        operator,
        image.width(),
        image.height(),
        config.output.display()
    );

    if let Some(report_path) = &config.report_json {
        let report = RunReport {
            input: config.input.clone(),
            operator: operator.name().to_string(),
            width: image.width(),
            height: image.height(),
            latency_ms,
            boxes,
            annotations,
        };
        write_json_file(report_path, &report)?;
        println!("Saved report to {}", report_path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: vision-lab <config.json>".to_string()
}
