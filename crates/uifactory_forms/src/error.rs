use std::io;

#[derive(Debug, thiserror::Error)]
pub enum FormsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed field config at index {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },
}

pub type FormsResult<T> = Result<T, FormsError>;
