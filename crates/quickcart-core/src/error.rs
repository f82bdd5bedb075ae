use std::path::PathBuf;

use thiserror::Error;

/// Core error type shared across quickcart crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A table file that must exist was not found.
    #[error("raw input not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("config file not found: {}", .0.display())]
    MissingConfig(PathBuf),
    /// Settings are out of bounds or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience alias for results returned by quickcart crates.
pub type Result<T> = std::result::Result<T, Error>;
