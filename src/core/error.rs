use thiserror::Error;

#[derive(Error, Debug)]
pub enum CivicError {
    #[error("Citizen not found: {0}")]
    CitizenNotFound(crate::core::types::CitizenId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CivicError>;
