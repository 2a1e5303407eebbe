//! Password hashing.

use serde_json::json;

use crate::error::AppError;

/// bcrypt hasher with a configurable work factor.
///
/// Hashing runs on tokio's blocking pool so request workers are not stalled.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if bcrypt fails or the blocking task panics.
    pub async fn hash(&self, password: String) -> Result<String, AppError> {
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing task failed");
                AppError::internal("Password hashing failed", json!({}))
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "bcrypt error");
                AppError::internal("Password hashing failed", json!({}))
            })
    }
}
