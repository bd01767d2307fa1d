//! Credential checks and session tokens

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::session::SessionClaims,
};

/// Decides whether a username/password pair may open a session
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> AppResult<bool>;
}

/// Single administrator account taken from configuration. Only an
/// argon2 hash of the password is kept in memory.
pub struct ConfiguredCredentials {
    username: String,
    password_hash: String,
}

impl ConfiguredCredentials {
    pub fn new(username: &str, password: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        Ok(Self {
            username: username.to_string(),
            password_hash: hash.to_string(),
        })
    }
}

#[async_trait]
impl CredentialVerifier for ConfiguredCredentials {
    async fn verify(&self, username: &str, password: &str) -> AppResult<bool> {
        if username != self.username {
            return Ok(false);
        }
        let parsed_hash = PasswordHash::new(&self.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[derive(Clone)]
pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, config: AuthConfig) -> Self {
        Self { verifier, config }
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        if !self.verifier.verify(username, password).await? {
            tracing::warn!(username, "Login failed");
            return Err(AppError::Authentication);
        }

        let claims = SessionClaims::new(username, self.config.session_expiration_hours);
        let token = claims
            .create_token(&self.config.session_secret)
            .map_err(|e| AppError::Internal(format!("Failed to sign session: {}", e)))?;

        tracing::info!(username, "Login successful");
        Ok(token)
    }

    /// Resolve a session token, `Unauthenticated` if missing, forged or expired
    pub fn validate_session(&self, token: &str) -> AppResult<SessionClaims> {
        SessionClaims::from_token(token, &self.config.session_secret).map_err(|e| {
            tracing::debug!("Rejected session token: {}", e);
            AppError::Unauthenticated
        })
    }
}
