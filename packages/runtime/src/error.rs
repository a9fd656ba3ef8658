//! Error types for the framework runtime.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or reaching the framework.
#[derive(Debug, Error)]
pub enum FrameworkError {
    /// `Framework::instance` was called before `Framework::init`.
    #[error("framework is not initialized")]
    NotInitialized,

    /// `Framework::init` was called twice.
    #[error("framework is already initialized")]
    AlreadyInitialized,

    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration was not valid JSON for [`crate::FrameworkConfig`].
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Registration against the data layer failed.
    #[error("data error: {0}")]
    Data(#[from] aspect_data::DataError),

    /// Registration against a catalog failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] aspect_catalog::CatalogError),
}

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, FrameworkError>;
