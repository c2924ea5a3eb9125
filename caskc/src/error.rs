//! CLI-level error type for `caskc`, mirroring how `cask-lex`/`cask-par`
//! each carry their own `thiserror` enum rather than a bare `String`.

use cask_util::ErrorGroup;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaskcError {
    #[error("could not read {path}: {source}")]
    ReadFile { path: String, source: std::io::Error },

    #[error("{0}")]
    Parse(#[from] ErrorGroup),

    #[error("could not serialize resolved cask: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CaskcError>;
