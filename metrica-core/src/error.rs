//! Error types for metrica-core

use thiserror::Error;

/// Main error type for the metrica-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Translation catalog parse error
    #[error("catalog parse error: {0}")]
    CatalogParse(#[from] toml::de::Error),

    /// Translation catalog error
    #[error("catalog error: {0}")]
    Catalog(String),

    /// A custom aggregation template did not contain exactly one placeholder
    #[error("invalid aggregation template {template:?}: expected exactly one '%s' placeholder, found {placeholders}")]
    InvalidTemplate {
        template: String,
        placeholders: usize,
    },

    /// A computed metric referenced a dependent metric absent from the value set
    #[error("unresolved dependent metric: {0}")]
    UnresolvedDependency(String),

    /// A metric name was registered twice
    #[error("duplicate metric name: {0}")]
    DuplicateMetric(String),
}

/// Result type alias for metrica-core
pub type Result<T> = std::result::Result<T, Error>;
