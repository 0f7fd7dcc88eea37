//! Reader for OpenCV's trained cascade files (`haarcascade_*.xml`).
//!
//! Only the current `opencv-cascade-classifier` layout with boosted stumps on
//! upright Haar features is understood:
//!
//! ```xml
//! <opencv_storage><cascade>
//!   <featureType>HAAR</featureType><height>24</height><width>24</width>
//!   <stages><_>
//!     <stageThreshold>-1.5</stageThreshold>
//!     <weakClassifiers><_>
//!       <internalNodes>0 -1 0 -3.15e-02</internalNodes>
//!       <leafValues>2.08 -2.21</leafValues></_></weakClassifiers></_></stages>
//!   <features><_><rects><_>6 4 12 9 -1.</_><_>6 7 12 3 3.</_></rects></_></features>
//! </cascade></opencv_storage>
//! ```
//!
//! `internalNodes` is `left right feature threshold`, and `leafValues` holds
//! the votes below and above the threshold.
use super::cascade::{CascadeStage, HaarCascade, HaarRect, WeakClassifier};
use crate::error::{Result, VisionError};
use roxmltree::{Document, Node};
use std::str::FromStr;

fn unavailable(msg: impl Into<String>) -> VisionError {
    VisionError::ClassifierUnavailable(msg.into())
}

fn elements<'a, 'i>(node: Node<'a, 'i>) -> impl Iterator<Item = Node<'a, 'i>> {
    node.children().filter(|n| n.is_element())
}

fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Result<Node<'a, 'i>> {
    elements(node)
        .find(|n| n.has_tag_name(name))
        .ok_or_else(|| unavailable(format!("missing <{name}> in <{}>", node.tag_name().name())))
}

fn text<'a>(node: Node<'a, '_>) -> &'a str {
    node.text().unwrap_or("").trim()
}

fn parse_value<T: FromStr>(node: Node<'_, '_>) -> Result<T> {
    let raw = text(node);
    raw.parse()
        .map_err(|_| unavailable(format!("bad value {raw:?} in <{}>", node.tag_name().name())))
}

fn parse_list<T: FromStr>(node: Node<'_, '_>) -> Result<Vec<T>> {
    text(node)
        .split_whitespace()
        .map(|tok| {
            tok.parse()
                .map_err(|_| unavailable(format!("bad number {tok:?} in <{}>", node.tag_name().name())))
        })
        .collect()
}

fn parse_feature(node: Node<'_, '_>) -> Result<Vec<HaarRect>> {
    if let Ok(tilted) = child(node, "tilted") {
        if text(tilted) != "0" {
            return Err(unavailable("tilted Haar features are not supported"));
        }
    }
    elements(child(node, "rects")?)
        .map(|rect| {
            let v: Vec<f32> = parse_list(rect)?;
            let coords_ok = v.len() == 5 && v[..4].iter().all(|c| *c >= 0.0 && c.fract() == 0.0);
            if !coords_ok {
                return Err(unavailable(format!("malformed rectangle {:?}", text(rect))));
            }
            Ok(HaarRect {
                x: v[0] as u32,
                y: v[1] as u32,
                w: v[2] as u32,
                h: v[3] as u32,
                weight: v[4],
            })
        })
        .collect()
}

fn parse_weak(node: Node<'_, '_>, features: &[Vec<HaarRect>]) -> Result<WeakClassifier> {
    let nodes: Vec<f64> = parse_list(child(node, "internalNodes")?)?;
    let leaves: Vec<f32> = parse_list(child(node, "leafValues")?)?;
    if nodes.len() != 4 || leaves.len() != 2 {
        return Err(unavailable(
            "only single-split weak classifiers are supported",
        ));
    }
    let index = nodes[2];
    let rects = (index >= 0.0 && index.fract() == 0.0)
        .then(|| features.get(index as usize))
        .flatten()
        .ok_or_else(|| unavailable(format!("feature index {index} out of range")))?;
    Ok(WeakClassifier {
        rects: rects.clone(),
        threshold: nodes[3] as f32,
        left: leaves[0],
        right: leaves[1],
    })
}

/// Parse an OpenCV cascade document into a validated [`HaarCascade`].
pub fn parse_opencv_cascade(data: &str) -> Result<HaarCascade> {
    let doc = Document::parse(data).map_err(|e| unavailable(format!("invalid XML: {e}")))?;
    let root = doc
        .descendants()
        .find(|n| n.has_tag_name("cascade"))
        .ok_or_else(|| unavailable("no <cascade> element (legacy cascade layout?)"))?;

    if let Ok(kind) = child(root, "featureType") {
        if !text(kind).eq_ignore_ascii_case("HAAR") {
            return Err(unavailable(format!(
                "unsupported feature type {:?}",
                text(kind)
            )));
        }
    }
    let window = (
        parse_value::<u32>(child(root, "width")?)?,
        parse_value::<u32>(child(root, "height")?)?,
    );

    let features = elements(child(root, "features")?)
        .map(parse_feature)
        .collect::<Result<Vec<_>>>()?;

    let stages = elements(child(root, "stages")?)
        .map(|stage| {
            let threshold = parse_value::<f32>(child(stage, "stageThreshold")?)?;
            let weak = elements(child(stage, "weakClassifiers")?)
                .map(|w| parse_weak(w, &features))
                .collect::<Result<Vec<_>>>()?;
            Ok(CascadeStage { threshold, weak })
        })
        .collect::<Result<Vec<_>>>()?;

    let cascade = HaarCascade { window, stages };
    cascade.validate()?;
    Ok(cascade)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STAGE: &str = r#"<?xml version="1.0"?>
<opencv_storage>
<cascade type_id="opencv-cascade-classifier"><stageType>BOOST</stageType>
  <featureType>HAAR</featureType>
  <height>24</height>
  <width>20</width>
  <stageNum>2</stageNum>
  <stages>
    <_>
      <maxWeakCount>1</maxWeakCount>
      <stageThreshold>-5.0425500869750977e-01</stageThreshold>
      <weakClassifiers>
        <_>
          <internalNodes>
            0 -1 1 -3.1511999666690826e-02</internalNodes>
          <leafValues>
            2.0875380039215088e+00 -2.2172100543975830e+00</leafValues></_></weakClassifiers></_>
    <_>
      <maxWeakCount>2</maxWeakCount>
      <stageThreshold>0.</stageThreshold>
      <weakClassifiers>
        <_>
          <internalNodes>
            0 -1 0 1.2396000325679779e-02</internalNodes>
          <leafValues>
            -1.8633940219879150e+00 1.3272049427032471e+00</leafValues></_>
        <_>
          <internalNodes>
            0 -1 1 2.1927999332547188e-02</internalNodes>
          <leafValues>
            -1.5105249881744385e+00 1.0625729560852051e+00</leafValues></_></weakClassifiers></_></stages>
  <features>
    <_>
      <rects>
        <_>
          6 4 12 9 -1.</_>
        <_>
          6 7 12 3 3.</_></rects></_>
    <_>
      <rects>
        <_>
          2 10 16 4 -1.</_>
        <_>
          2 12 16 2 2.</_></rects>
      <tilted>0</tilted></_></features></cascade>
</opencv_storage>
"#;

    #[test]
    fn maps_stages_stumps_and_features() {
        let cascade = parse_opencv_cascade(TWO_STAGE).unwrap();
        assert_eq!(cascade.window, (20, 24));
        assert_eq!(cascade.stages.len(), 2);
        assert_eq!(cascade.stages[1].weak.len(), 2);

        let first = &cascade.stages[0].weak[0];
        assert_eq!(first.rects[0], HaarRect { x: 2, y: 10, w: 16, h: 4, weight: -1.0 });
        assert_eq!(first.rects[1].weight, 2.0);
        assert!((first.threshold + 0.031_512).abs() < 1e-6);
        assert!((first.left - 2.087_538).abs() < 1e-5);
        assert!((first.right + 2.217_21).abs() < 1e-5);
        assert!((cascade.stages[0].threshold + 0.504_255).abs() < 1e-5);

        let second = &cascade.stages[1].weak[0];
        assert_eq!((second.rects[1].y, second.rects[1].h), (7, 3));
    }

    #[test]
    fn rejects_unsupported_layouts() {
        let tilted = TWO_STAGE.replace("<tilted>0</tilted>", "<tilted>1</tilted>");
        let deep = TWO_STAGE.replace("0 -1 1 -3.1511999666690826e-02", "1 2 1 0.5 -1 -2 0 0.1");
        let bad_index = TWO_STAGE.replace("0 -1 0 1.2396000325679779e-02", "0 -1 7 0.01");
        let lbp = TWO_STAGE.replace("<featureType>HAAR", "<featureType>LBP");
        for (label, xml) in [
            ("tilted", tilted),
            ("deep", deep),
            ("index", bad_index),
            ("lbp", lbp),
            ("truncated", TWO_STAGE[..400].to_string()),
        ] {
            assert!(
                matches!(
                    parse_opencv_cascade(&xml),
                    Err(VisionError::ClassifierUnavailable(_))
                ),
                "{label}"
            );
        }
    }
}
