pub mod analyze;
pub mod inspect;

use std::path::Path;

use anyhow::{Context, Result};
use rowslope_core::AnalysisConfig;

/// Resolves the run configuration: defaults, optional TOML file, `ROWSLOPE_*`
/// environment, then the threshold flag.
pub fn resolve_config(path: Option<&Path>, threshold: Option<f64>) -> Result<AnalysisConfig> {
    let config = match path {
        Some(path) => AnalysisConfig::from_path(path)?,
        None => AnalysisConfig::default(),
    };
    let mut config = config
        .with_env_overrides()
        .context("invalid ROWSLOPE_* environment override")?;

    if let Some(threshold) = threshold {
        config.slope_threshold_percent = threshold;
        config.validate()?;
    }
    Ok(config)
}

pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
