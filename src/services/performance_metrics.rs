//! Cálculo de métricas de rendimiento
//!
//! Función pura: a partir de lo medido en una ruta completada y del tiempo
//! estimado de la ruta deriva velocidad, eficiencia de combustible, eficiencia
//! de tiempo y un puntaje combinado 0-100.

use serde::{Deserialize, Serialize};

/// Métricas derivadas, redondeadas a 2 decimales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub average_speed_kmh: f64,
    pub fuel_efficiency_km_per_liter: f64,
    pub time_efficiency: f64,
    pub efficiency_score: f64,
}

impl PerformanceMetrics {
    pub fn calculate(
        distance_traveled_km: f64,
        fuel_consumed_liters: f64,
        actual_time_hours: f64,
        estimated_time_hours: f64,
    ) -> Self {
        let average_speed_kmh = if actual_time_hours > 0.0 {
            distance_traveled_km / actual_time_hours
        } else {
            0.0
        };

        let fuel_efficiency_km_per_liter = if fuel_consumed_liters > 0.0 {
            distance_traveled_km / fuel_consumed_liters
        } else {
            0.0
        };

        let time_efficiency = if estimated_time_hours <= 0.0 {
            100.0
        } else if actual_time_hours <= 0.0 {
            0.0
        } else {
            (estimated_time_hours / actual_time_hours * 100.0).clamp(0.0, 100.0)
        };

        let efficiency_score =
            (time_efficiency + (fuel_efficiency_km_per_liter * 10.0).min(100.0)) / 2.0;

        Self {
            average_speed_kmh: round2(average_speed_kmh),
            fuel_efficiency_km_per_liter: round2(fuel_efficiency_km_per_liter),
            time_efficiency: round2(time_efficiency),
            efficiency_score: round2(efficiency_score),
        }
    }
}

/// Redondea sobre la expansión decimal exacta; los empates van al dígito par
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
