//! Writers for regional shards and the shard index.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use super::write_atomic;
use crate::core::partition::{RegionShard, StateIndex};

/// Create the shard directory and any missing parents.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))
}

/// Write one shard into `dir`, returning the path written.
pub fn write_shard(dir: &Path, shard: &RegionShard<'_>) -> Result<PathBuf> {
    let path = dir.join(shard.file_name());
    debug!(path = %path.display(), region = shard.region, count = shard.count, "writing shard");
    write_json(&path, shard)?;
    Ok(path)
}

pub fn write_index(path: &Path, index: &StateIndex) -> Result<()> {
    debug!(path = %path.display(), regions = index.states.len(), "writing shard index");
    write_json(path, index)
}

/// Serialize `value` to pretty-printed JSON with trailing newline.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(value)
        .with_context(|| format!("serialize {}", path.display()))?;
    buf.push('\n');
    write_atomic(path, &buf)
}
