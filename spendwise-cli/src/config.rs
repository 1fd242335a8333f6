use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spendwise_core::{AdvisorConfig, DEFAULT_TOP_EXPENSES};
use spendwise_ingest::DatasetStore;
use spendwise_ingest::store::{DEFAULT_SAMPLE_FILE, DEFAULT_UPLOAD_FILE};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_data_dir, ensure_spendwise_home, expand_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageSection,
    pub report: ReportSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Directory holding the sample and uploaded ledgers (default: ~/.spendwise/data)
    pub data_dir: Option<PathBuf>,
    pub sample_file: String,
    pub upload_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    pub top_expenses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Default filter when RUST_LOG is unset and --verbose is off
    pub level: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: None,
            sample_file: DEFAULT_SAMPLE_FILE.to_string(),
            upload_file: DEFAULT_UPLOAD_FILE.to_string(),
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            top_expenses: DEFAULT_TOP_EXPENSES,
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Dataset store described by this config; `data_dir_override` wins over the file.
    /// A leading `~` in either is the home directory.
    pub fn dataset_store(&self, data_dir_override: Option<&Path>) -> Result<DatasetStore> {
        let data_dir = match data_dir_override.or(self.storage.data_dir.as_deref()) {
            Some(dir) => expand_home(dir)?,
            None => default_data_dir()?,
        };
        Ok(DatasetStore::with_files(
            data_dir,
            &self.storage.sample_file,
            &self.storage.upload_file,
        ))
    }

    pub fn advisor_config(&self) -> AdvisorConfig {
        AdvisorConfig::default().with_top_expenses(self.report.top_expenses)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_spendwise_home()?.join("config.toml"))
}

/// Load `path` (or the default location); a missing file means defaults
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
