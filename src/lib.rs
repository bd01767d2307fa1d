//! Hartland Community Library
//!
//! Catalog and circulation server for a small lending library: books and
//! checkout records are held in memory and served over HTTP behind a
//! single-account login gate.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::{RecordStore, Repository};
use services::Services;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
}

impl AppState {
    /// Build the record store (seeded if configured) and all services
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let store = if config.library.seed_catalog {
            RecordStore::seeded()?
        } else {
            RecordStore::new()
        };
        let services = Services::new(Repository::new(store), config.auth.clone())?;

        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
