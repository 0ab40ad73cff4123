use serde::Deserialize;
use validator::Validate;

use crate::dto::pagination::{PaginationParams, DEFAULT_LIMIT};
use crate::models::route::{NewRoute, RouteChanges, RouteFilter, RouteStatus};
use crate::utils::validation::validate_not_blank;

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

// Request para crear una ruta
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub origin: String,

    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub destination: String,

    pub distance_km: f64,
    pub estimated_time_hours: f64,
    pub unit_id: i64,
}

// Request para actualizar los campos editables de una ruta
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRouteRequest {
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub origin: Option<String>,

    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub destination: Option<String>,

    pub distance_km: Option<f64>,
    pub estimated_time_hours: Option<f64>,
}

// Request para cambiar el estado de una ruta
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpdateRouteStatusRequest {
    pub status: RouteStatus,
}

/// Filtros `?status&unit_id&offset&limit` para listar rutas
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct RouteListParams {
    pub status: Option<RouteStatus>,
    pub unit_id: Option<i64>,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub offset: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
}

impl RouteListParams {
    pub fn filter(&self) -> RouteFilter {
        RouteFilter {
            status: self.status,
            unit_id: self.unit_id,
        }
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            offset: self.offset,
            limit: self.limit,
        }
    }
}

impl From<CreateRouteRequest> for NewRoute {
    fn from(request: CreateRouteRequest) -> Self {
        Self {
            origin: request.origin,
            destination: request.destination,
            distance_km: request.distance_km,
            estimated_time_hours: request.estimated_time_hours,
            unit_id: request.unit_id,
        }
    }
}

impl From<UpdateRouteRequest> for RouteChanges {
    fn from(request: UpdateRouteRequest) -> Self {
        Self {
            origin: request.origin,
            destination: request.destination,
            distance_km: request.distance_km,
            estimated_time_hours: request.estimated_time_hours,
        }
    }
}
