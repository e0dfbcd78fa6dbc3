use crate::state::codec::DecodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not fetch plugins: {0}")]
    CatalogLoad(String),

    #[error("Invalid shareable state: {0}")]
    Decode(#[from] DecodeError),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, VdError>;
