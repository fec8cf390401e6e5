use std::io;

use canvas::doc::DocError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("invalid snapshot JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid snapshot: {0}")]
    Doc(#[from] DocError),
    #[error("post-it {0} is not in the snapshot")]
    UnknownPostit(Uuid),
    #[error("post-it {0} is drawn in its parent's orbit and has no orbit of its own")]
    NotARoot(Uuid),
    #[error("setting `{name}` must be positive, got {value}")]
    InvalidSetting { name: &'static str, value: f64 },
}

impl CliError {
    /// Stable machine-readable code, printed alongside the message.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "E_READ",
            Self::Write { .. } => "E_WRITE",
            Self::InvalidJson(_) => "E_INVALID_JSON",
            Self::Doc(err) => err.error_code(),
            Self::UnknownPostit(_) => "E_UNKNOWN_POSTIT",
            Self::NotARoot(_) => "E_NOT_A_ROOT",
            Self::InvalidSetting { .. } => "E_INVALID_SETTING",
        }
    }
}
