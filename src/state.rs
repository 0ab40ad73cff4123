//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Es la raíz de composición: elige el
//! almacenamiento y construye los servicios por request.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Repositories;
use crate::services::{
    BcryptHasher, PasswordHasher, PerformanceService, RouteService, UnitService, UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub repos: Repositories,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, repos: Repositories) -> Self {
        let hasher = Arc::new(BcryptHasher::new(config.bcrypt_cost));
        Self {
            config,
            repos,
            hasher,
        }
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(self.repos.clone(), self.hasher.clone())
    }

    pub fn unit_service(&self) -> UnitService {
        UnitService::new(self.repos.clone())
    }

    pub fn route_service(&self) -> RouteService {
        RouteService::new(self.repos.clone())
    }

    pub fn performance_service(&self) -> PerformanceService {
        PerformanceService::new(self.repos.clone())
    }
}
