use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("category file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
