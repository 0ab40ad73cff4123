//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! y las reglas que cada entidad aplica sobre sí misma.

pub mod performance;
pub mod route;
pub mod unit;
pub mod user;

pub use performance::{Measurements, NewPerformanceRecord, PerformanceChanges, PerformanceRecord};
pub use route::{NewRoute, Route, RouteChanges, RouteFilter, RouteStatus};
pub use unit::{NewUnit, Unit, UnitChanges};
pub use user::{NewUser, User, UserChanges, UserResponse};
