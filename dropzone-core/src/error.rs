use thiserror::Error;

#[derive(Error, Debug)]
pub enum DropzoneError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The capture surface refused the drop (extension, file count, not a file).
    #[error("Rejected: {0}")]
    Rejected(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, DropzoneError>;
