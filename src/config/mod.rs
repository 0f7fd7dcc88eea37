pub mod params;
pub mod tool;

pub use params::{BilateralParams, BlurParams, CannyParams, MedianParams, OperatorParams};
pub use tool::{load_config, ToolConfig};
