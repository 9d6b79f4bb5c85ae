//! Error types for rule loading.

use thiserror::Error;

/// The rule source could not be read at all.
///
/// Loaders recover from this by returning [`RuleSet::Unavailable`](super::RuleSet::Unavailable).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// A failure that aborts the current load and surfaces as a generic 500.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no sheets found in rule source")]
    NoSheets,

    #[error("worksheet \"{0}\" not found in rule source")]
    SheetMissing(String),

    #[error("rule loading aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}
