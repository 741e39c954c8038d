use std::path::PathBuf;

use thiserror::Error;

/// User facing precondition failures. None of them are fatal and none leave state half-changed.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Tracking is already in progress!")]
    AlreadyTracking,
    #[error("No active tracking session.")]
    NotTracking,
    #[error("No usage data to {action}.")]
    EmptyLog { action: LogAction },
    #[error("Error exporting the usage log to {}.", path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Operation that needed at least one entry in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogAction {
    Export,
    View,
}

impl std::fmt::Display for LogAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogAction::Export => write!(f, "export"),
            LogAction::View => write!(f, "view"),
        }
    }
}
