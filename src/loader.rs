//! Loading report input from disk.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Reads a JSON file as raw input for [`crate::engine::analyze_json`].
///
/// Shape checks are left to the engine so that malformed collections
/// are reported as [`crate::error::AnalysisError::InvalidInput`].
pub fn load_input_json(path: &Path) -> Result<Value> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading sales data from {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {} as JSON", path.display()))
}
