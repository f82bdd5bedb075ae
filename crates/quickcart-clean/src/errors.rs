use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the cleaning engine.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("raw input not found: {}", path.display())]
    MissingInput { path: PathBuf },
    #[error(transparent)]
    Core(quickcart_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<quickcart_core::Error> for CleanError {
    fn from(err: quickcart_core::Error) -> Self {
        match err {
            quickcart_core::Error::MissingInput(path) => Self::MissingInput { path },
            other => Self::Core(other),
        }
    }
}
