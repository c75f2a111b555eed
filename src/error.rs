//! Error type shared by the teardown, control and configuration layers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by lifecycle operations.
///
/// Only a few of these are ever fatal during a system teardown: the privilege
/// gate and configuration problems detected before the first mutation. Step
/// failures are carried as `StepOutcome::Failed` instead.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("this operation must be run as root (try: sudo)")]
    PermissionDenied,

    #[error("invalid application identifier {id:?}: {reason}")]
    InvalidAppId { id: String, reason: &'static str },

    #[error("could not determine the home directory of the invoking user")]
    HomeNotFound,

    #[error("failed to remove {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("service is not installed: {} does not exist", .0.display())]
    NotInstalled(PathBuf),

    #[error("failed to load configuration from {}: {detail}", .path.display())]
    Config { path: PathBuf, detail: String },

    #[error("{0}")]
    System(String),
}

impl LifecycleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
