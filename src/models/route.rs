//! Modelo de Route
//!
//! Este módulo contiene el struct Route, su máquina de estados y los setters
//! tipados que aplican las reglas de negocio antes de mutar la ruta.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::require_positive;

/// Estado de la ruta - mapea al ENUM route_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "route_status")]
pub enum RouteStatus {
    #[serde(rename = "ASIGNADA")]
    #[sqlx(rename = "ASIGNADA")]
    Assigned,
    #[serde(rename = "EN_RUTA")]
    #[sqlx(rename = "EN_RUTA")]
    InProgress,
    #[serde(rename = "COMPLETADA")]
    #[sqlx(rename = "COMPLETADA")]
    Completed,
    #[serde(rename = "CANCELADA")]
    #[sqlx(rename = "CANCELADA")]
    Cancelled,
}

impl RouteStatus {
    pub const ALL: [RouteStatus; 4] = [
        RouteStatus::Assigned,
        RouteStatus::InProgress,
        RouteStatus::Completed,
        RouteStatus::Cancelled,
    ];

    /// Tabla de transiciones válidas
    pub const fn allowed_transitions(self) -> &'static [RouteStatus] {
        match self {
            RouteStatus::Assigned => &[RouteStatus::InProgress, RouteStatus::Cancelled],
            RouteStatus::InProgress => &[RouteStatus::Completed, RouteStatus::Cancelled],
            RouteStatus::Completed | RouteStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: RouteStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RouteStatus::Assigned => "ASIGNADA",
            RouteStatus::InProgress => "EN_RUTA",
            RouteStatus::Completed => "COMPLETADA",
            RouteStatus::Cancelled => "CANCELADA",
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route principal - mapea a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Route {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub estimated_time_hours: f64,
    pub status: RouteStatus,
    pub unit_id: i64,
    pub assigned_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Datos ya validados para insertar una ruta nueva (siempre en ASIGNADA)
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub estimated_time_hours: f64,
    pub unit_id: i64,
}

/// Cambios parciales sobre los campos editables de una ruta
#[derive(Debug, Clone, Default)]
pub struct RouteChanges {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub distance_km: Option<f64>,
    pub estimated_time_hours: Option<f64>,
}

/// Filtros para listar rutas
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteFilter {
    pub status: Option<RouteStatus>,
    pub unit_id: Option<i64>,
}

impl Route {
    /// Mueve la ruta a `next` si la tabla lo permite.
    ///
    /// `started_at` y `completed_at` se sellan sólo la primera vez.
    pub fn transition_to(&mut self, next: RouteStatus, now: DateTime<Utc>) -> AppResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        match next {
            RouteStatus::InProgress => {
                self.started_at.get_or_insert(now);
            }
            RouteStatus::Completed => {
                self.completed_at.get_or_insert(now);
            }
            RouteStatus::Assigned | RouteStatus::Cancelled => {}
        }

        self.status = next;
        self.updated_at = Some(now);
        Ok(())
    }

    /// Aplica cambios de campos; una ruta completada no admite ninguno.
    pub fn apply_changes(&mut self, changes: RouteChanges, now: DateTime<Utc>) -> AppResult<()> {
        if self.status == RouteStatus::Completed {
            return Err(AppError::InvalidState(
                "A completed route cannot be updated".to_string(),
            ));
        }

        if let Some(distance_km) = changes.distance_km {
            require_positive("distance_km", distance_km)?;
        }
        if let Some(estimated_time_hours) = changes.estimated_time_hours {
            require_positive("estimated_time_hours", estimated_time_hours)?;
        }

        if let Some(origin) = changes.origin {
            self.origin = origin;
        }
        if let Some(destination) = changes.destination {
            self.destination = destination;
        }
        if let Some(distance_km) = changes.distance_km {
            self.distance_km = distance_km;
        }
        if let Some(estimated_time_hours) = changes.estimated_time_hours {
            self.estimated_time_hours = estimated_time_hours;
        }

        self.updated_at = Some(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn assigned_route() -> Route {
        let now = Utc::now();
        Route {
            id: 1,
            origin: "Monterrey".to_string(),
            destination: "Saltillo".to_string(),
            distance_km: 85.0,
            estimated_time_hours: 1.5,
            status: RouteStatus::Assigned,
            unit_id: 1,
            assigned_at: now,
            started_at: None,
            completed_at: None,
            created_at: now,
            updated_at: None,
        }
    }

    #[test]
    fn test_transition_table() {
        use RouteStatus::*;
        assert_eq!(Assigned.allowed_transitions(), &[InProgress, Cancelled]);
        assert_eq!(InProgress.allowed_transitions(), &[Completed, Cancelled]);
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Assigned.is_terminal());
    }

    #[test]
    fn test_assigned_to_completed_is_rejected() {
        let mut route = assigned_route();
        let err = route
            .transition_to(RouteStatus::Completed, Utc::now())
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::InvalidTransition {
                from: RouteStatus::Assigned,
                to: RouteStatus::Completed
            }
        ));
        assert_eq!(route.status, RouteStatus::Assigned);
        assert!(route.completed_at.is_none());
    }

    #[test]
    fn test_full_lifecycle_stamps_timestamps() {
        let mut route = assigned_route();
        let started = Utc::now();
        let finished = started + Duration::hours(2);

        route.transition_to(RouteStatus::InProgress, started).unwrap();
        assert_eq!(route.started_at, Some(started));
        assert!(route.completed_at.is_none());

        route.transition_to(RouteStatus::Completed, finished).unwrap();
        assert_eq!(route.started_at, Some(started));
        assert_eq!(route.completed_at, Some(finished));
        assert_eq!(route.updated_at, Some(finished));
    }

    #[test]
    fn test_existing_started_at_is_kept() {
        let mut route = assigned_route();
        let earlier = Utc::now() - Duration::days(1);
        route.started_at = Some(earlier);

        route.transition_to(RouteStatus::InProgress, Utc::now()).unwrap();
        assert_eq!(route.started_at, Some(earlier));
    }

    #[test]
    fn test_completed_route_rejects_any_update() {
        let mut route = assigned_route();
        route.status = RouteStatus::Completed;

        let err = route
            .apply_changes(RouteChanges::default(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));

        let err = route
            .apply_changes(
                RouteChanges {
                    origin: Some("Torreón".to_string()),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        assert_eq!(route.origin, "Monterrey");
    }

    #[test]
    fn test_update_rejects_non_positive_distance_without_partial_write() {
        let mut route = assigned_route();
        let err = route
            .apply_changes(
                RouteChanges {
                    origin: Some("Torreón".to_string()),
                    distance_km: Some(0.0),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(route.origin, "Monterrey");
        assert_eq!(route.distance_km, 85.0);
    }

    #[test]
    fn test_cancelled_route_still_accepts_field_updates() {
        let mut route = assigned_route();
        route.transition_to(RouteStatus::Cancelled, Utc::now()).unwrap();

        route
            .apply_changes(
                RouteChanges {
                    destination: Some("Reynosa".to_string()),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();
        assert_eq!(route.destination, "Reynosa");
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&RouteStatus::InProgress).unwrap(),
            "\"EN_RUTA\""
        );
        let parsed: RouteStatus = serde_json::from_str("\"CANCELADA\"").unwrap();
        assert_eq!(parsed, RouteStatus::Cancelled);
    }

    fn any_status() -> impl Strategy<Value = RouteStatus> {
        prop::sample::select(RouteStatus::ALL.to_vec())
    }

    proptest! {
        /// Una transición sólo tiene éxito si está en la tabla
        #[test]
        fn transitions_follow_the_table(from in any_status(), to in any_status()) {
            let mut route = assigned_route();
            route.status = from;

            let result = route.transition_to(to, Utc::now());
            if from.can_transition_to(to) {
                prop_assert!(result.is_ok());
                prop_assert_eq!(route.status, to);
            } else {
                let is_invalid_transition = matches!(result, Err(AppError::InvalidTransition { .. }));
                prop_assert!(is_invalid_transition);
                prop_assert_eq!(route.status, from);
            }
        }
    }
}
