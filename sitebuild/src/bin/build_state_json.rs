//! Split `pilots.json` into per-region shards plus `states-index.json`.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use sitebuild::error::exit_code_for;
use sitebuild::{exit_codes, logging, split};

#[derive(Parser)]
#[command(
    name = "build-state-json",
    version,
    about = "Write one JSON shard per region and an index summarizing them"
)]
struct Cli {
    /// Site root holding `pilots.json` (and optionally `sitebuild.toml`).
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(exit_code_for(&err));
    }
    std::process::exit(exit_codes::OK);
}

fn run(cli: &Cli) -> Result<()> {
    let report = split::split_regions_at(&cli.root, Utc::now())?;
    for warning in report.warning_lines() {
        eprintln!("{warning}");
    }
    println!("{report}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_root() {
        let cli = Cli::parse_from(["build-state-json", "--root", "site"]);
        assert_eq!(cli.root, PathBuf::from("site"));
    }
}
