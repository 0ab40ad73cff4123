use serde::Deserialize;
use validator::Validate;

use crate::models::performance::{Measurements, PerformanceChanges};

// Request para registrar el rendimiento de una ruta completada
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePerformanceRequest {
    pub route_id: i64,
    pub distance_traveled_km: f64,
    pub fuel_consumed_liters: f64,
    pub actual_time_hours: f64,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl CreatePerformanceRequest {
    pub fn measurements(&self) -> Measurements {
        Measurements {
            distance_traveled_km: self.distance_traveled_km,
            fuel_consumed_liters: self.fuel_consumed_liters,
            actual_time_hours: self.actual_time_hours,
        }
    }
}

// Request para actualizar mediciones o notas
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePerformanceRequest {
    pub distance_traveled_km: Option<f64>,
    pub fuel_consumed_liters: Option<f64>,
    pub actual_time_hours: Option<f64>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl From<UpdatePerformanceRequest> for PerformanceChanges {
    fn from(request: UpdatePerformanceRequest) -> Self {
        Self {
            distance_traveled_km: request.distance_traveled_km,
            fuel_consumed_liters: request.fuel_consumed_liters,
            actual_time_hours: request.actual_time_hours,
            notes: request.notes,
        }
    }
}
