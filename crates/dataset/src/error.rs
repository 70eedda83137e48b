use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid value '{value}' in column '{column}' at row {row}: {reason}")]
    DataFormat {
        /// 1-based data row, header excluded.
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },
}
