//! Bearer token authentication.
//!
//! Tokens are HS256 JWTs whose `sub` claim carries the user id. The role is
//! never read from the token: every request reloads the account, so a role
//! change or a deletion takes effect immediately.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Resolves a raw bearer token into an [`Identity`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, expired,
    /// signed with another key, or refers to a user that no longer exists.
    async fn authenticate(&self, token: &str) -> Result<Identity, AppError>;
}

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies tokens with a shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, issuer: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Mints a token for `user`.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            AppError::internal("Failed to sign token", json!({}))
        })
    }

    /// Verifies signature, issuer and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Invalid or expired token"}),
                )
            })
    }
}

/// [`Authenticator`] that verifies a JWT and reloads the user it names.
pub struct JwtAuthenticator<R: UserRepository> {
    repository: Arc<R>,
    codec: TokenCodec,
}

impl<R: UserRepository> JwtAuthenticator<R> {
    pub fn new(repository: Arc<R>, codec: TokenCodec) -> Self {
        Self { repository, codec }
    }
}

#[async_trait]
impl<R: UserRepository> Authenticator for JwtAuthenticator<R> {
    async fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        let claims = self.codec.verify(token)?;

        let user_id: i64 = claims.sub.parse().map_err(|_| {
            AppError::unauthorized("Unauthorized", json!({"reason": "Malformed subject"}))
        })?;

        let user = self.repository.find_by_id(user_id).await?.ok_or_else(|| {
            AppError::unauthorized("Unauthorized", json!({"reason": "Account no longer exists"}))
        })?;

        Ok(Identity::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-signing-secret-0123456789", "users-api", 1)
    }

    fn test_user(id: i64, role: Role) -> User {
        User {
            id,
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            birth_at: None,
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let codec = codec();

        let token = codec.issue(&test_user(12, Role::Admin)).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.sub, "12");
        assert_eq!(claims.iss, "users-api");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let token = TokenCodec::new("another-secret-abcdefghijkl", "users-api", 1)
            .issue(&test_user(1, Role::Admin))
            .unwrap();

        let result = codec().verify(&token);
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_verify_rejects_other_issuer() {
        let token = TokenCodec::new("test-signing-secret-0123456789", "someone-else", 1)
            .issue(&test_user(1, Role::Admin))
            .unwrap();

        assert!(codec().verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Beyond the default 60s leeway.
        let token = TokenCodec::new("test-signing-secret-0123456789", "users-api", -1)
            .issue(&test_user(1, Role::Admin))
            .unwrap();

        assert!(codec().verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(codec().verify("not.a.jwt").is_err());
    }

    #[tokio::test]
    async fn test_authenticate_loads_current_role() {
        let mut mock_repo = MockUserRepository::new();

        // Token was minted while the user was an admin; the stored role wins.
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|id| Ok(Some(test_user(id, Role::User))));

        let codec = codec();
        let token = codec.issue(&test_user(3, Role::Admin)).unwrap();
        let authenticator = JwtAuthenticator::new(Arc::new(mock_repo), codec);

        let identity = authenticator.authenticate(&token).await.unwrap();

        assert_eq!(identity.user_id, 3);
        assert_eq!(identity.role, Role::User);
    }

    #[tokio::test]
    async fn test_authenticate_deleted_user() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let codec = codec();
        let token = codec.issue(&test_user(3, Role::Admin)).unwrap();
        let authenticator = JwtAuthenticator::new(Arc::new(mock_repo), codec);

        let result = authenticator.authenticate(&token).await;
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token_skips_lookup() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().never();

        let authenticator = JwtAuthenticator::new(Arc::new(mock_repo), codec());

        let result = authenticator.authenticate("invalid-token").await;
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }
}
