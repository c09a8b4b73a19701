//! Site configuration stored in `sitebuild.toml` next to the dataset.
//!
//! The file is optional. Without it the tools run with the fixed production
//! settings returned by `SiteConfig::default()`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::sitemap::{StaticPage, default_static_pages};

/// Config file name, resolved against the site root.
pub const CONFIG_FILE_NAME: &str = "sitebuild.toml";

/// Site build configuration (TOML).
///
/// Missing fields default to the production values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host prefixed to every sitemap path, no trailing slash.
    pub domain: String,

    /// Pilots dataset, relative to the site root.
    pub input: PathBuf,

    /// Sitemap output, relative to the site root.
    pub sitemap: PathBuf,

    /// Directory receiving regional shards, relative to the site root.
    pub data_dir: PathBuf,

    /// File name of the shard index inside `data_dir`.
    pub index_file: String,

    pub static_pages: Vec<StaticPage>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: "https://usdronemap.com".to_string(),
            input: PathBuf::from("pilots.json"),
            sitemap: PathBuf::from("sitemap.xml"),
            data_dir: PathBuf::from("data"),
            index_file: "states-index.json".to_string(),
            static_pages: default_static_pages(),
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.domain.starts_with("https://") || self.domain.starts_with("http://")) {
            return Err(anyhow!("domain must start with http:// or https://"));
        }
        if self.domain.ends_with('/') {
            return Err(anyhow!("domain must not end with '/'"));
        }
        for (name, path) in [
            ("input", &self.input),
            ("sitemap", &self.sitemap),
            ("data_dir", &self.data_dir),
        ] {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("{name} must be a non-empty path"));
            }
        }
        if self.index_file.is_empty() || self.index_file.contains(['/', '\\']) {
            return Err(anyhow!("index_file must be a plain file name"));
        }
        for page in &self.static_pages {
            if !page.path.starts_with('/') {
                return Err(anyhow!("static page path '{}' must start with '/'", page.path));
            }
            let priority: f64 = page.priority.parse().map_err(|_| {
                anyhow!("static page '{}' has non-numeric priority", page.path)
            })?;
            if !(0.0..=1.0).contains(&priority) {
                return Err(anyhow!(
                    "static page '{}' priority must be within 0.0..=1.0",
                    page.path
                ));
            }
        }
        Ok(())
    }
}

/// Absolute locations of every file the tools touch for one site root.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub root: PathBuf,
    pub input_path: PathBuf,
    pub sitemap_path: PathBuf,
    pub data_dir: PathBuf,
    pub index_path: PathBuf,
}

impl SitePaths {
    pub fn new(root: impl Into<PathBuf>, cfg: &SiteConfig) -> Self {
        let root = root.into();
        let data_dir = root.join(&cfg.data_dir);
        Self {
            input_path: root.join(&cfg.input),
            sitemap_path: root.join(&cfg.sitemap),
            index_path: data_dir.join(&cfg.index_file),
            data_dir,
            root,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SiteConfig::default()`.
pub fn load_config(path: &Path) -> Result<SiteConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        let cfg = SiteConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SiteConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), domain = %cfg.domain, "config loaded");
    Ok(cfg)
}

/// Load `sitebuild.toml` from `root`.
pub fn load_site_config(root: &Path) -> Result<SiteConfig> {
    load_config(&root.join(CONFIG_FILE_NAME))
}
