use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type ProgressResult<T> = std::result::Result<T, ProgressError>;
