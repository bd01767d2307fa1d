//! Business logic services

pub mod auth;
pub mod catalog;
pub mod checkouts;

use std::sync::Arc;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

use auth::{ConfiguredCredentials, CredentialVerifier};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub checkouts: checkouts::CheckoutService,
}

impl Services {
    /// Create all services, checking logins against the configured account
    pub fn new(repository: Repository, auth_config: AuthConfig) -> AppResult<Self> {
        let credentials =
            ConfiguredCredentials::new(&auth_config.admin_username, &auth_config.admin_password)?;
        Ok(Self::with_verifier(repository, auth_config, Arc::new(credentials)))
    }

    /// Create all services with a custom credential check
    pub fn with_verifier(
        repository: Repository,
        auth_config: AuthConfig,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            auth: auth::AuthService::new(verifier, auth_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            checkouts: checkouts::CheckoutService::new(repository),
        }
    }
}
