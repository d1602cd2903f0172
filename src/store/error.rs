use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Data path must be a directory if existing: {0}")]
    NotADirectory(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid JSON in {path}: {message}")]
    Json { path: String, message: String },
}
