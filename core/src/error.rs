use thiserror::Error;

/// Failures the pipelines recover from locally.
///
/// There is no fatal variant: every error ends in a user notification plus a
/// diagnostic log entry, and the pipeline that hit it moves on to its next
/// unit of work (next locale for import, sibling items for export).
#[derive(Error, Debug)]
pub enum SyncError {
    /// The service answered, but with a non-"Ok" status.
    #[error("remote rejected {call}: {message}")]
    RemoteRejection { call: &'static str, message: String },

    /// A store operation failed or returned an unusable identifier.
    #[error("store operation failed: {0}")]
    Store(String),

    /// Network-level failure reaching the service.
    #[error("transport error: {0}")]
    Transport(#[from] anyhow::Error),
}
