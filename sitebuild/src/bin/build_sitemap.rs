//! Generate `sitemap.xml` from `pilots.json`.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use sitebuild::error::exit_code_for;
use sitebuild::{exit_codes, logging, sitemap};

#[derive(Parser)]
#[command(
    name = "build-sitemap",
    version,
    about = "Write sitemap.xml for static pages and every real pilot profile"
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
    let report = sitemap::build_sitemap_at(&cli.root, Utc::now().date_naive())?;
    println!("{report}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_defaults_to_current_dir() {
        let cli = Cli::parse_from(["build-sitemap"]);
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn parse_root() {
        let cli = Cli::parse_from(["build-sitemap", "--root", "/srv/site"]);
        assert_eq!(cli.root, PathBuf::from("/srv/site"));
    }
}
