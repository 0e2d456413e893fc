//! Inlining error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or expanding a static asset.
#[derive(Debug, Error)]
pub enum InlineError {
    #[error("static file `{name}` not found in any static directory")]
    NotFound { name: String },

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("circular @import: {}", chain.join(" -> "))]
    ImportCycle { chain: Vec<String> },
}
