use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

fn home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home))
}

/// `$SPENDWISE_HOME`, else `~/.spendwise`
pub fn spendwise_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SPENDWISE_HOME") {
        if !dir.trim().is_empty() {
            return expand_home(Path::new(&dir));
        }
    }
    Ok(home_dir()?.join(".spendwise"))
}

pub fn ensure_spendwise_home() -> Result<PathBuf> {
    let dir = spendwise_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_data_dir() -> Result<PathBuf> {
    Ok(spendwise_home()?.join("data"))
}

/// Expand a leading `~` component against `$HOME`; other paths pass through
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    if path.starts_with("~") {
        Ok(expand_home_in(path, &home_dir()?))
    } else {
        Ok(path.to_path_buf())
    }
}

fn expand_home_in(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) if rest.as_os_str().is_empty() => home.to_path_buf(),
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}
