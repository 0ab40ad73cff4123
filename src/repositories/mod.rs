//! Repositorios (puerto de almacenamiento)
//!
//! Un trait async por entidad. `Pg*Repository` implementa cada uno sobre
//! PostgreSQL; `InMemoryStore` implementa los cuatro para tests y para
//! arrancar sin base de datos.

pub mod memory;
pub mod performance_repository;
pub mod route_repository;
pub mod unit_repository;
pub mod user_repository;

use std::sync::Arc;

use sqlx::PgPool;

pub use memory::InMemoryStore;
pub use performance_repository::{PerformanceRepository, PgPerformanceRepository};
pub use route_repository::{PgRouteRepository, RouteRepository};
pub use unit_repository::{PgUnitRepository, UnitRepository};
pub use user_repository::{PgUserRepository, UserRepository};

/// Ventana de paginación ya validada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 100,
        }
    }
}

/// Conjunto de repositorios que comparten los servicios
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub units: Arc<dyn UnitRepository>,
    pub routes: Arc<dyn RouteRepository>,
    pub performance: Arc<dyn PerformanceRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            units: Arc::new(PgUnitRepository::new(pool.clone())),
            routes: Arc::new(PgRouteRepository::new(pool.clone())),
            performance: Arc::new(PgPerformanceRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            units: Arc::new(store.clone()),
            routes: Arc::new(store.clone()),
            performance: Arc::new(store),
        }
    }
}
