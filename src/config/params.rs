//! Tunable operator parameters. Every default reproduces the fixed behaviour
//! of the operator catalog.
use crate::error::{Result, VisionError};
use crate::face::ScanParams;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    pub low: f32,
    pub high: f32,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low: 100.0,
            high: 200.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurParams {
    /// Odd kernel size.
    pub ksize: usize,
    /// Standard deviation; `<= 0` derives it from `ksize`.
    pub sigma: f32,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            ksize: 15,
            sigma: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilateralParams {
    pub diameter: usize,
    pub sigma_color: f32,
    pub sigma_space: f32,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            diameter: 9,
            sigma_color: 75.0,
            sigma_space: 75.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedianParams {
    /// Odd window size.
    pub ksize: usize,
}

impl Default for MedianParams {
    fn default() -> Self {
        Self { ksize: 5 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorParams {
    pub canny: CannyParams,
    pub gaussian_blur: BlurParams,
    pub bilateral: BilateralParams,
    pub median: MedianParams,
    pub face: ScanParams,
}

fn invalid(msg: String) -> VisionError {
    VisionError::InvalidParameter(msg)
}

impl OperatorParams {
    pub fn validate(&self) -> Result<()> {
        let c = &self.canny;
        if !(c.low >= 0.0 && c.high >= c.low) {
            return Err(invalid(format!(
                "canny thresholds must satisfy 0 <= low <= high (got {} / {})",
                c.low, c.high
            )));
        }
        let g = &self.gaussian_blur;
        if g.ksize == 0 || g.ksize % 2 == 0 {
            return Err(invalid(format!(
                "gaussian_blur.ksize must be odd and positive (got {})",
                g.ksize
            )));
        }
        if !g.sigma.is_finite() {
            return Err(invalid("gaussian_blur.sigma must be finite".to_string()));
        }
        let b = &self.bilateral;
        if b.diameter == 0 {
            return Err(invalid("bilateral.diameter must be positive".to_string()));
        }
        if !(b.sigma_color > 0.0 && b.sigma_space > 0.0) {
            return Err(invalid(format!(
                "bilateral sigmas must be positive (got {} / {})",
                b.sigma_color, b.sigma_space
            )));
        }
        let m = &self.median;
        if m.ksize == 0 || m.ksize % 2 == 0 {
            return Err(invalid(format!(
                "median.ksize must be odd and positive (got {})",
                m.ksize
            )));
        }
        let f = &self.face;
        if !(f.scale_factor.is_finite() && f.scale_factor > 1.0) {
            return Err(invalid(format!(
                "face.scale_factor must exceed 1 (got {})",
                f.scale_factor
            )));
        }
        if let Some((mw, mh)) = f.max_size {
            if mw < f.min_size.0 || mh < f.min_size.1 {
                return Err(invalid(format!(
                    "face.max_size {:?} is smaller than min_size {:?}",
                    (mw, mh),
                    f.min_size
                )));
            }
        }
        Ok(())
    }
}
