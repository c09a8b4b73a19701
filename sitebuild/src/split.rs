//! Regional splitter: `pilots.json` -> `data/pilots-<code>.json` + index.
//!
//! Records with an unknown region are reported, not fatal. Shards from earlier
//! runs whose region is now empty are left on disk.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::core::partition::{RejectedRecord, partition_by_region};
use crate::core::pilot::real_pilots;
use crate::io::config::{SitePaths, load_site_config};
use crate::io::dataset::load_pilots;
use crate::io::shards::{ensure_output_dir, write_index, write_shard};

/// Number of regions listed in the ranking.
pub const TOP_REGIONS: usize = 5;

/// One shard written during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenShard {
    pub region: String,
    pub count: usize,
    pub verified: usize,
    pub path: PathBuf,
}

/// Operator-facing summary of one split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    /// Records left after removing honeypots.
    pub real_pilots: usize,
    pub rejected: Vec<RejectedRecord>,
    pub shards: Vec<WrittenShard>,
    pub index_path: PathBuf,
    pub accepted: usize,
    pub verified: usize,
    pub top_regions: Vec<(String, usize)>,
}

impl SplitReport {
    /// One warning line per rejected record.
    pub fn warning_lines(&self) -> Vec<String> {
        self.rejected
            .iter()
            .map(|record| {
                format!(
                    "warning: invalid region for {} ({}): \"{}\"",
                    record.name, record.id, record.raw_region
                )
            })
            .collect()
    }
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "split: real_pilots={} (honeypots excluded)", self.real_pilots)?;
        for shard in &self.shards {
            let file = shard
                .path
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default();
            writeln!(f, "split: {} {} pilots -> {}", shard.region, shard.count, file)?;
        }
        writeln!(f, "split: index -> {}", self.index_path.display())?;
        writeln!(f, "summary: total_pilots={}", self.accepted)?;
        writeln!(f, "summary: regions_covered={}", self.shards.len())?;
        write!(f, "summary: verified_pilots={}", self.verified)?;
        if !self.top_regions.is_empty() {
            write!(f, "\ntop {} regions:", TOP_REGIONS)?;
            for (rank, (region, count)) in self.top_regions.iter().enumerate() {
                write!(f, "\n  {}. {}: {} pilots", rank + 1, region, count)?;
            }
        }
        Ok(())
    }
}

/// Partition pilots by region and write shards plus index under `paths.data_dir`.
pub fn split_regions(paths: &SitePaths, generated: DateTime<Utc>) -> Result<SplitReport> {
    let pilots = real_pilots(load_pilots(&paths.input_path)?);
    let real_count = pilots.len();
    debug!(real_pilots = real_count, "partitioning by region");

    let partition = partition_by_region(pilots);
    ensure_output_dir(&paths.data_dir)?;

    let mut shards = Vec::new();
    for shard in partition.shards() {
        let path = write_shard(&paths.data_dir, &shard)?;
        shards.push(WrittenShard {
            region: shard.region.to_string(),
            count: shard.count,
            verified: shard.verified,
            path,
        });
    }
    write_index(&paths.index_path, &partition.index(generated))?;

    let report = SplitReport {
        real_pilots: real_count,
        rejected: partition.rejected().to_vec(),
        shards,
        index_path: paths.index_path.clone(),
        accepted: partition.accepted_count(),
        verified: partition.verified_count(),
        top_regions: partition.top_regions(TOP_REGIONS),
    };
    info!(
        accepted = report.accepted,
        rejected = report.rejected.len(),
        regions = report.shards.len(),
        "regional split complete"
    );
    Ok(report)
}

/// Load `sitebuild.toml` (if any) from `root` and run the split.
pub fn split_regions_at(root: &Path, generated: DateTime<Utc>) -> Result<SplitReport> {
    let cfg = load_site_config(root)?;
    split_regions(&SitePaths::new(root, &cfg), generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::partition::StateIndex;
    use crate::error::exit_code_for;
    use crate::exit_codes;
    use crate::test_support::{SCENARIO_DATASET, TestSite};
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("time")
    }

    fn read_json(site: &TestSite, rel: &str) -> Value {
        serde_json::from_str(&site.read(rel).expect("read")).expect("parse")
    }

    #[test]
    fn scenario_dataset_writes_one_shard_and_one_warning() {
        let site = TestSite::with_dataset(SCENARIO_DATASET).expect("site");
        let report = split_regions_at(site.root(), at()).expect("split");

        assert_eq!(report.real_pilots, 2);
        assert_eq!(report.accepted, 1);
        assert_eq!(report.shards.len(), 1);
        assert_eq!(report.warning_lines().len(), 1);
        assert!(report.warning_lines()[0].contains("(2): \"ZZ\""));

        let shard = read_json(&site, "data/pilots-ca.json");
        assert_eq!(shard["region"], "CA");
        assert_eq!(shard["count"], 1);
        assert_eq!(shard["verified"], 1);
        assert_eq!(shard["pilots"], json!([{"id": 1, "st": "ca", "v": true}]));

        let index: StateIndex =
            serde_json::from_value(read_json(&site, "data/states-index.json")).expect("index");
        assert_eq!(index.generated, "2024-06-01T12:00:00.000Z");
        assert_eq!(index.total_pilots, 1);
        assert_eq!(index.states.len(), 1);
        assert_eq!(index.states["CA"].count, 1);
        assert_eq!(index.states["CA"].verified, 1);
        assert_eq!(index.states["CA"].file, "pilots-ca.json");
    }

    #[test]
    fn empty_dataset_writes_only_index() {
        let site = TestSite::with_dataset(r#"{"pilots": []}"#).expect("site");
        let report = split_regions_at(site.root(), at()).expect("split");
        assert!(report.shards.is_empty());

        let index = read_json(&site, "data/states-index.json");
        assert_eq!(index["totalPilots"], 0);
        assert_eq!(index["states"], json!({}));
        let entries = std::fs::read_dir(site.root().join("data"))
            .expect("read dir")
            .count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn honeypots_never_reach_shards() {
        let site = TestSite::with_dataset(
            r#"{"pilots":[
                {"id":"a","st":"tx"},
                {"id":"h1","st":"tx","_honeypot":true},
                {"id":"h2","st":"ZZ","_honeypot":true}
            ]}"#,
        )
        .expect("site");
        let report = split_regions_at(site.root(), at()).expect("split");

        assert!(report.rejected.is_empty());
        let raw = site.read("data/pilots-tx.json").expect("read");
        assert!(!raw.contains("h1"));
        assert!(!raw.contains("_honeypot"));
    }

    #[test]
    fn index_counts_match_shard_files() {
        let site = TestSite::with_dataset(
            r#"{"pilots":[
                {"id":1,"st":"tx","v":true},
                {"id":2,"st":"TX"},
                {"id":3,"st":"ny","v":true},
                {"id":4,"st":"Tx","v":true}
            ]}"#,
        )
        .expect("site");
        split_regions_at(site.root(), at()).expect("split");

        let index = read_json(&site, "data/states-index.json");
        let states = index["states"].as_object().expect("states");
        assert_eq!(states.keys().collect::<Vec<_>>(), vec!["NY", "TX"]);
        for (code, summary) in states {
            let file = summary["file"].as_str().expect("file");
            let shard = read_json(&site, &format!("data/{file}"));
            assert_eq!(shard["region"], code.as_str());
            assert_eq!(shard["count"], summary["count"]);
            assert_eq!(shard["verified"], summary["verified"]);
        }
        assert_eq!(states["TX"]["count"], 3);
        assert_eq!(states["TX"]["verified"], 2);
    }

    #[test]
    fn stale_shards_are_left_in_place() {
        let site = TestSite::with_dataset(r#"{"pilots":[{"id":1,"st":"ca"}]}"#).expect("site");
        std::fs::create_dir_all(site.root().join("data")).expect("mkdir");
        std::fs::write(site.root().join("data/pilots-or.json"), "{}\n").expect("seed");

        split_regions_at(site.root(), at()).expect("split");
        assert!(site.root().join("data/pilots-or.json").exists());
        assert!(site.root().join("data/pilots-ca.json").exists());
    }

    #[test]
    fn rerun_is_byte_identical_for_shards() {
        let site = TestSite::with_dataset(SCENARIO_DATASET).expect("site");
        split_regions_at(site.root(), at()).expect("first");
        let shard = site.read("data/pilots-ca.json").expect("read");
        let index = site.read("data/states-index.json").expect("read");

        split_regions_at(site.root(), at()).expect("second");
        assert_eq!(site.read("data/pilots-ca.json").expect("read"), shard);
        assert_eq!(site.read("data/states-index.json").expect("read"), index);
    }

    #[test]
    fn missing_dataset_creates_no_output_dir() {
        let site = TestSite::new().expect("site");
        let err = split_regions_at(site.root(), at()).expect_err("missing");
        assert_eq!(exit_code_for(&err), exit_codes::MISSING_INPUT);
        assert!(!site.root().join("data").exists());
    }

    #[test]
    fn report_ranks_top_regions() {
        let site = TestSite::with_dataset(
            r#"{"pilots":[
                {"id":1,"st":"wi"},{"id":2,"st":"tx"},{"id":3,"st":"tx"},
                {"id":4,"st":"ca"},{"id":5,"st":"mn"},{"id":6,"st":"al"},{"id":7,"st":"ny"}
            ]}"#,
        )
        .expect("site");
        let report = split_regions_at(site.root(), at()).expect("split");

        let text = report.to_string();
        assert!(text.contains("summary: total_pilots=7"));
        assert!(text.contains("summary: regions_covered=6"));
        assert!(text.contains("  1. TX: 2 pilots"));
        assert!(text.contains("  2. WI: 1 pilots"));
        assert!(text.contains("  5. AL: 1 pilots"));
        assert!(!text.contains("NY: 1"));
    }
}
