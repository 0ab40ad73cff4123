//! Modelo de PerformanceRecord (rendimiento de una ruta completada)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::services::performance_metrics::PerformanceMetrics;
use crate::utils::errors::AppResult;
use crate::utils::validation::require_positive;

/// PerformanceRecord principal - mapea a la tabla performance_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct PerformanceRecord {
    pub id: i64,
    pub route_id: i64,
    pub distance_traveled_km: f64,
    pub fuel_consumed_liters: f64,
    pub actual_time_hours: f64,
    pub average_speed_kmh: f64,
    pub fuel_efficiency_km_per_liter: f64,
    pub time_efficiency: f64,
    pub efficiency_score: f64,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Mediciones de origen de un registro
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub distance_traveled_km: f64,
    pub fuel_consumed_liters: f64,
    pub actual_time_hours: f64,
}

impl Measurements {
    /// Las tres mediciones deben ser estrictamente positivas
    pub fn validate(&self) -> AppResult<()> {
        require_positive("distance_traveled_km", self.distance_traveled_km)?;
        require_positive("fuel_consumed_liters", self.fuel_consumed_liters)?;
        require_positive("actual_time_hours", self.actual_time_hours)?;
        Ok(())
    }

    pub fn metrics(&self, estimated_time_hours: f64) -> PerformanceMetrics {
        PerformanceMetrics::calculate(
            self.distance_traveled_km,
            self.fuel_consumed_liters,
            self.actual_time_hours,
            estimated_time_hours,
        )
    }
}

/// Registro listo para insertar, con las métricas ya calculadas
#[derive(Debug, Clone)]
pub struct NewPerformanceRecord {
    pub route_id: i64,
    pub measurements: Measurements,
    pub metrics: PerformanceMetrics,
    pub notes: Option<String>,
}

/// Cambios parciales; cualquier medición presente obliga a recalcular
#[derive(Debug, Clone, Default)]
pub struct PerformanceChanges {
    pub distance_traveled_km: Option<f64>,
    pub fuel_consumed_liters: Option<f64>,
    pub actual_time_hours: Option<f64>,
    pub notes: Option<String>,
}

impl PerformanceChanges {
    pub fn touches_measurements(&self) -> bool {
        self.distance_traveled_km.is_some()
            || self.fuel_consumed_liters.is_some()
            || self.actual_time_hours.is_some()
    }
}

impl PerformanceRecord {
    pub fn measurements(&self) -> Measurements {
        Measurements {
            distance_traveled_km: self.distance_traveled_km,
            fuel_consumed_liters: self.fuel_consumed_liters,
            actual_time_hours: self.actual_time_hours,
        }
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics {
            average_speed_kmh: self.average_speed_kmh,
            fuel_efficiency_km_per_liter: self.fuel_efficiency_km_per_liter,
            time_efficiency: self.time_efficiency,
            efficiency_score: self.efficiency_score,
        }
    }

    /// Reemplaza las mediciones y recalcula las cuatro métricas derivadas.
    pub fn set_measurements(
        &mut self,
        measurements: Measurements,
        estimated_time_hours: f64,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        measurements.validate()?;
        let metrics = measurements.metrics(estimated_time_hours);

        self.distance_traveled_km = measurements.distance_traveled_km;
        self.fuel_consumed_liters = measurements.fuel_consumed_liters;
        self.actual_time_hours = measurements.actual_time_hours;
        self.average_speed_kmh = metrics.average_speed_kmh;
        self.fuel_efficiency_km_per_liter = metrics.fuel_efficiency_km_per_liter;
        self.time_efficiency = metrics.time_efficiency;
        self.efficiency_score = metrics.efficiency_score;
        self.updated_at = Some(now);
        Ok(())
    }

    pub fn set_notes(&mut self, notes: String, now: DateTime<Utc>) {
        self.notes = Some(notes);
        self.updated_at = Some(now);
    }

    /// Mediciones resultantes de superponer `changes` sobre las actuales
    pub fn merged_measurements(&self, changes: &PerformanceChanges) -> Measurements {
        Measurements {
            distance_traveled_km: changes
                .distance_traveled_km
                .unwrap_or(self.distance_traveled_km),
            fuel_consumed_liters: changes
                .fuel_consumed_liters
                .unwrap_or(self.fuel_consumed_liters),
            actual_time_hours: changes.actual_time_hours.unwrap_or(self.actual_time_hours),
        }
    }
}
