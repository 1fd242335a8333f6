use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Row {row}: {message}")]
    Parse { row: u64, message: String },

    #[error(
        "No dataset found: neither {} nor {} exists",
        .uploaded.display(),
        .sample.display()
    )]
    NoDataset { uploaded: PathBuf, sample: PathBuf },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
