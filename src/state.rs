//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::FleetRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub repository: Arc<dyn FleetRepository>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, repository: Arc<dyn FleetRepository>) -> Self {
        Self { config, repository }
    }
}
