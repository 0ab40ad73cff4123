//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. Los servicios
//! dependen sólo de los traits de repositorio, así que funcionan igual sobre
//! PostgreSQL o sobre el almacén en memoria.

pub mod business_rules;
pub mod password_service;
pub mod performance_metrics;
pub mod performance_service;
pub mod route_service;
pub mod unit_service;
pub mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use password_service::{BcryptHasher, PasswordHasher};
pub use performance_metrics::PerformanceMetrics;
pub use performance_service::PerformanceService;
pub use route_service::RouteService;
pub use unit_service::UnitService;
pub use user_service::UserService;
