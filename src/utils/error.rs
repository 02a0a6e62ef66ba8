use crate::domain::model::ImportStats;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unsupported dataset type: {name}")]
    UnsupportedDataset { name: String },

    #[error("Unsupported file type: {filename}")]
    UnsupportedFileType { filename: String },

    #[error("File is not valid UTF-8 text")]
    InvalidEncoding,

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("Batch commit failed: {reason}")]
    CommitFailed { reason: String, stats: ImportStats },
}

impl RegistryError {
    /// Errors caused by the request itself (bad selector, bad file) rather
    /// than by the engine or the store. An HTTP-facing caller maps these to
    /// 4xx and everything else to 5xx.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RegistryError::UnsupportedDataset { .. }
                | RegistryError::UnsupportedFileType { .. }
                | RegistryError::InvalidEncoding
        )
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
