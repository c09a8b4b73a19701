//! Region partitioning for the regional splitter.
//!
//! Groups real pilots by normalized region code and derives the shard and
//! index documents. Every input record ends up either in exactly one group
//! or in the rejected list.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::pilot::{PilotRecord, verified_count};
use super::regions::{normalize_region, shard_file_name};

/// A real pilot whose region code is missing or unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub id: String,
    pub name: String,
    pub raw_region: String,
}

impl RejectedRecord {
    fn from_pilot(pilot: &PilotRecord) -> Self {
        Self {
            id: pilot.id_text(),
            name: pilot.name_text(),
            raw_region: pilot.raw_region_text(),
        }
    }
}

/// Accepted groups (first-appearance order) plus rejected records.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    groups: IndexMap<String, Vec<PilotRecord>>,
    rejected: Vec<RejectedRecord>,
}

/// Per-region shard document (`pilots-<code>.json`).
#[derive(Debug, Serialize)]
pub struct RegionShard<'a> {
    pub region: &'a str,
    pub count: usize,
    pub verified: usize,
    pub pilots: &'a [PilotRecord],
}

impl RegionShard<'_> {
    pub fn file_name(&self) -> String {
        shard_file_name(self.region)
    }
}

/// Index document (`states-index.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateIndex {
    pub generated: String,
    pub total_pilots: usize,
    pub states: BTreeMap<String, StateSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    pub count: usize,
    pub verified: usize,
    pub file: String,
}

/// Split `pilots` (honeypots already removed) by region.
pub fn partition_by_region(pilots: Vec<PilotRecord>) -> Partition {
    let mut partition = Partition::default();
    for pilot in pilots {
        match pilot.region().and_then(normalize_region) {
            Some(code) => partition.groups.entry(code).or_default().push(pilot),
            None => partition.rejected.push(RejectedRecord::from_pilot(&pilot)),
        }
    }
    partition
}

/// ISO 8601 UTC timestamp with millisecond precision and `Z` suffix.
pub fn format_generated(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Partition {
    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    pub fn region_count(&self) -> usize {
        self.groups.len()
    }

    pub fn accepted_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn verified_count(&self) -> usize {
        self.groups.values().map(|group| verified_count(group)).sum()
    }

    /// Shards sorted by region code.
    pub fn shards(&self) -> Vec<RegionShard<'_>> {
        let mut shards: Vec<RegionShard<'_>> = self
            .groups
            .iter()
            .map(|(code, pilots)| RegionShard {
                region: code.as_str(),
                count: pilots.len(),
                verified: verified_count(pilots),
                pilots: pilots.as_slice(),
            })
            .collect();
        shards.sort_by(|a, b| a.region.cmp(b.region));
        shards
    }

    pub fn index(&self, generated: DateTime<Utc>) -> StateIndex {
        let states = self
            .shards()
            .into_iter()
            .map(|shard| {
                let summary = StateSummary {
                    count: shard.count,
                    verified: shard.verified,
                    file: shard.file_name(),
                };
                (shard.region.to_string(), summary)
            })
            .collect();
        StateIndex {
            generated: format_generated(generated),
            total_pilots: self.accepted_count(),
            states,
        }
    }

    /// Largest regions first; equal counts keep first-appearance order.
    pub fn top_regions(&self, limit: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self
            .groups
            .iter()
            .map(|(code, pilots)| (code.clone(), pilots.len()))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}
