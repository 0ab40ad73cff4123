//! DTOs de la API
//!
//! Requests y parámetros de consulta, con validación de forma vía `validator`.
//! Las reglas de negocio viven en `services`.

pub mod pagination;
pub mod performance_dto;
pub mod route_dto;
pub mod unit_dto;
pub mod user_dto;
