use crate::error::{AppError, AppResult};

/// In-memory credential for the lifetime of the process. The empty string is
/// the unauthenticated sentinel; nothing is ever persisted and there is no
/// logout, only overwrite by a later login.
#[derive(Debug, Default)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a non-empty token exactly as given. An empty token fails with a
    /// validation error and leaves any previously stored credential intact.
    pub fn login(&mut self, token: &str) -> AppResult<()> {
        if token.is_empty() {
            return Err(AppError::Validation("credential required".to_string()));
        }
        self.token = token.to_string();
        Ok(())
    }

    pub fn credential(&self) -> Option<&str> {
        self.is_authenticated().then(|| self.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}
