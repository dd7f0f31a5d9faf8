use thiserror::Error;

use super::config::ConfigError;

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Placeholder data is only available in development mode")]
    DevelopmentModeDisabled,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type DraftResult<T> = std::result::Result<T, DraftError>;
