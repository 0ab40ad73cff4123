//! Fleet Control
//!
//! Backend de gestión de flota: conductores, unidades, rutas con su máquina
//! de estados y registros de rendimiento con métricas derivadas.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
