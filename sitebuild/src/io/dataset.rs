//! Loading `pilots.json` with presence check and schema validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::debug;

use crate::core::pilot::{Dataset, PilotRecord};
use crate::error::BuildError;

const DATASET_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/pilots.schema.json"
));

/// Load every pilot record from `path`, honeypots included.
///
/// Fails with [`BuildError::MissingInput`] before touching anything else if
/// the file does not exist.
pub fn load_pilots(path: &Path) -> Result<Vec<PilotRecord>> {
    if !path.exists() {
        return Err(BuildError::MissingInput {
            path: path.to_path_buf(),
        }
        .into());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    validate_schema(&value).with_context(|| format!("validate {}", path.display()))?;
    let dataset: Dataset = serde_json::from_value(value)
        .with_context(|| format!("deserialize {}", path.display()))?;
    let pilots = dataset.into_pilots();
    debug!(path = %path.display(), pilots = pilots.len(), "dataset loaded");
    Ok(pilots)
}

fn validate_schema(dataset: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(DATASET_SCHEMA).context("parse dataset schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    let messages = compiled
        .iter_errors(dataset)
        .map(|err| err.to_string())
        .collect::<Vec<_>>();
    if !messages.is_empty() {
        return Err(anyhow!(
            "dataset schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}
