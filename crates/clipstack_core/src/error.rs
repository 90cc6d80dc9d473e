//! Application error types for the bridge and local validation.
use crate::proto::BackendErrorKind;
use thiserror::Error;

/// Top-level front-end error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Backend rejected request ({kind}): {message}")]
    Backend {
        kind: BackendErrorKind,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Backend connection closed")]
    ConnectionClosed,
}

impl AppError {
    /// Structured failure kind, where one applies.
    ///
    /// # Returns
    /// The backend-reported kind for rejections, [`BackendErrorKind::Unavailable`]
    /// for transport-level failures, and [`BackendErrorKind::Internal`] otherwise.
    pub fn kind(&self) -> BackendErrorKind {
        match self {
            Self::Backend { kind, .. } => *kind,
            Self::Transport(_) | Self::ConnectionClosed => BackendErrorKind::Unavailable,
            Self::Protocol(_) | Self::Validation(_) => BackendErrorKind::Internal,
        }
    }
}
