use super::params::OperatorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of one `vision-lab` run.
#[derive(Debug, Deserialize)]
pub struct ToolConfig {
    pub input: PathBuf,
    /// Catalog name of the operator to apply.
    pub operator: String,
    pub output: PathBuf,
    /// JSON Haar cascade, required for `face-detection`.
    #[serde(default)]
    pub cascade: Option<PathBuf>,
    #[serde(default)]
    pub params: OperatorParams,
    /// Where to write the detection summary, if anywhere.
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
