use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("not logged in: a credential is required for this action")]
    Unauthenticated,
    #[error("tracker rejected the request ({status}): {message}")]
    RemoteRejected { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// True when the failure most likely means the credential is bad or missing.
    pub fn is_authorization(&self) -> bool {
        match self {
            AppError::Unauthenticated => true,
            AppError::RemoteRejected { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
