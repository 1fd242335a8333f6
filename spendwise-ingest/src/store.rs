//! On-disk dataset selection: the most recent upload wins over the bundled sample.

use serde::Serialize;
use spendwise_core::Transaction;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{IngestError, Result};
use crate::ledger_csv::{parse_ledger_csv, write_ledger};

pub const DEFAULT_SAMPLE_FILE: &str = "sample_transactions.csv";
pub const DEFAULT_UPLOAD_FILE: &str = "uploaded_transactions.csv";

/// Sample ledger shipped with the binary, seeded by `DatasetStore::seed_sample`
pub const BUNDLED_SAMPLE: &str = include_str!("../data/sample_transactions.csv");

/// Which file a dataset was loaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum DatasetSource {
    Uploaded(PathBuf),
    Sample(PathBuf),
}

impl DatasetSource {
    pub fn path(&self) -> &Path {
        match self {
            DatasetSource::Uploaded(p) | DatasetSource::Sample(p) => p,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatasetStore {
    data_dir: PathBuf,
    sample_file: PathBuf,
    upload_file: PathBuf,
}

impl DatasetStore {
    /// Store rooted at `data_dir` with the default file names
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_files(data_dir, DEFAULT_SAMPLE_FILE, DEFAULT_UPLOAD_FILE)
    }

    /// Relative file names resolve against `data_dir`
    pub fn with_files(
        data_dir: impl Into<PathBuf>,
        sample_file: impl AsRef<Path>,
        upload_file: impl AsRef<Path>,
    ) -> Self {
        let data_dir = data_dir.into();
        Self {
            sample_file: data_dir.join(sample_file),
            upload_file: data_dir.join(upload_file),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn sample_path(&self) -> &Path {
        &self.sample_file
    }

    pub fn upload_path(&self) -> &Path {
        &self.upload_file
    }

    /// Prefer the uploaded file, else the sample, else `NoDataset`
    pub fn active_source(&self) -> Result<DatasetSource> {
        if self.upload_file.exists() {
            Ok(DatasetSource::Uploaded(self.upload_file.clone()))
        } else if self.sample_file.exists() {
            Ok(DatasetSource::Sample(self.sample_file.clone()))
        } else {
            Err(IngestError::NoDataset {
                uploaded: self.upload_file.clone(),
                sample: self.sample_file.clone(),
            })
        }
    }

    /// Load the active dataset (uncategorized)
    pub fn load_active(&self) -> Result<(DatasetSource, Vec<Transaction>)> {
        let source = self.active_source()?;
        info!("Loading dataset from {}", source.path().display());
        let txns = parse_ledger_csv(source.path())?;
        Ok((source, txns))
    }

    /// Replace the uploaded dataset. The file is written beside its final
    /// location and renamed into place, so readers never see a partial file.
    pub fn save_upload(&self, transactions: &[Transaction]) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.data_dir)?;
        write_ledger(tmp.as_file_mut(), transactions)?;
        tmp.as_file_mut().flush()?;
        tmp.persist(&self.upload_file).map_err(std::io::Error::from)?;

        info!(
            "Saved {} transactions to {}",
            transactions.len(),
            self.upload_file.display()
        );
        Ok(self.upload_file.clone())
    }

    /// Drop the uploaded dataset so the sample becomes active again.
    /// Returns false when there was nothing to remove.
    pub fn clear_upload(&self) -> Result<bool> {
        if !self.upload_file.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.upload_file)?;
        Ok(true)
    }

    /// Write the bundled sample ledger unless one is already present.
    /// Returns true when a file was written.
    pub fn seed_sample(&self) -> Result<bool> {
        if self.sample_file.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.sample_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.sample_file, BUNDLED_SAMPLE)?;
        info!("Seeded sample dataset at {}", self.sample_file.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendwise_core::TxnType;

    fn store() -> (tempfile::TempDir, DatasetStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DatasetStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn test_no_dataset() {
        let (_dir, store) = store();
        let err = store.active_source().unwrap_err();
        assert!(matches!(err, IngestError::NoDataset { .. }));
        assert!(err.to_string().contains(DEFAULT_UPLOAD_FILE));
    }

    #[test]
    fn test_sample_then_upload_precedence() {
        let (_dir, store) = store();
        assert!(store.seed_sample().unwrap());
        assert!(!store.seed_sample().unwrap());
        assert_eq!(
            store.active_source().unwrap(),
            DatasetSource::Sample(store.sample_path().to_path_buf())
        );

        let txns = vec![Transaction::new("2024-01-05", None, "Uber", 250.0, TxnType::Expense)];
        store.save_upload(&txns).unwrap();
        let (source, loaded) = store.load_active().unwrap();
        assert_eq!(source, DatasetSource::Uploaded(store.upload_path().to_path_buf()));
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].description, "Uber");

        assert!(store.clear_upload().unwrap());
        assert!(!store.clear_upload().unwrap());
        assert!(matches!(store.active_source().unwrap(), DatasetSource::Sample(_)));
    }

    #[test]
    fn test_upload_overwrites_previous() {
        let (_dir, store) = store();
        let first = vec![
            Transaction::new("2024-01-01", None, "Pizza", 10.0, TxnType::Expense),
            Transaction::new("2024-01-02", None, "Pizza", 20.0, TxnType::Expense),
        ];
        let second = vec![Transaction::new("2024-02-01", None, "Salary", 100.0, TxnType::Income)];
        store.save_upload(&first).unwrap();
        store.save_upload(&second).unwrap();

        let (_, loaded) = store.load_active().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].kind, TxnType::Income);
    }

    #[test]
    fn test_bundled_sample_parses() {
        let txns = crate::ledger_csv::parse_ledger_reader(BUNDLED_SAMPLE.as_bytes()).unwrap();
        assert!(txns.len() >= 20);
        assert!(txns.iter().any(|t| t.kind == TxnType::Income));
        assert!(txns.iter().all(|t| t.parsed_date.is_some()));
    }
}
