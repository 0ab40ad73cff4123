//! Reglas de validación entre entidades
//!
//! Cada regla consulta los repositorios y devuelve el registro verificado o
//! un `AppError` estructurado. Las reglas que dependen sólo de una entidad
//! viven en su modelo.

use crate::models::route::{Route, RouteStatus};
use crate::models::unit::Unit;
use crate::models::user::User;
use crate::repositories::{PerformanceRepository, RouteRepository, UnitRepository, UserRepository};
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

/// El usuario existe, está activo y todavía no tiene unidad
pub async fn require_assignable_user(
    users: &dyn UserRepository,
    units: &dyn UnitRepository,
    user_id: i64,
) -> AppResult<User> {
    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| not_found_error("User", user_id))?;

    if !user.is_active {
        return Err(AppError::InvalidState(format!(
            "User with id '{}' is not active",
            user_id
        )));
    }

    if units.count_by_user(user_id).await? > 0 {
        return Err(AppError::Conflict(format!(
            "User with id '{}' already has a unit assigned",
            user_id
        )));
    }

    Ok(user)
}

/// La unidad existe y está activa
pub async fn require_active_unit(units: &dyn UnitRepository, unit_id: i64) -> AppResult<Unit> {
    let unit = units
        .find_by_id(unit_id)
        .await?
        .ok_or_else(|| not_found_error("Unit", unit_id))?;

    if !unit.is_active {
        return Err(AppError::InvalidState(format!(
            "Unit with id '{}' is not active",
            unit_id
        )));
    }

    Ok(unit)
}

/// La ruta existe, está completada y no tiene registro de rendimiento
pub async fn require_route_ready_for_record(
    routes: &dyn RouteRepository,
    performance: &dyn PerformanceRepository,
    route_id: i64,
) -> AppResult<Route> {
    let route = routes
        .find_by_id(route_id)
        .await?
        .ok_or_else(|| not_found_error("Route", route_id))?;

    if route.status != RouteStatus::Completed {
        return Err(AppError::PreconditionFailed(format!(
            "Route with id '{}' is {}, performance can only be recorded for {} routes",
            route_id,
            route.status,
            RouteStatus::Completed
        )));
    }

    if performance.find_by_route(route_id).await?.is_some() {
        return Err(conflict_error(
            "Performance record",
            "route_id",
            &route_id.to_string(),
        ));
    }

    Ok(route)
}

pub async fn ensure_email_available(
    users: &dyn UserRepository,
    email: &str,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    if users.email_exists(email, exclude_id).await? {
        return Err(conflict_error("User", "email", email));
    }
    Ok(())
}

pub async fn ensure_license_plate_available(
    units: &dyn UnitRepository,
    license_plate: &str,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    if units.license_plate_exists(license_plate, exclude_id).await? {
        return Err(conflict_error("Unit", "license_plate", license_plate));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_route, seed_unit, seed_user};
    use crate::repositories::InMemoryStore;
    use chrono::Utc;

    #[tokio::test]
    async fn test_user_must_exist_be_active_and_unassigned() {
        let store = InMemoryStore::new();

        let missing = require_assignable_user(&store, &store, 7).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let mut user = seed_user(&store, "a@x.com").await;
        assert!(require_assignable_user(&store, &store, user.id).await.is_ok());

        user.is_active = false;
        UserRepository::update(&store, &user).await.unwrap();
        let inactive = require_assignable_user(&store, &store, user.id).await;
        assert!(matches!(inactive, Err(AppError::InvalidState(_))));

        let other = seed_user(&store, "b@x.com").await;
        seed_unit(&store, other.id, "XYZ-999").await;
        let taken = require_assignable_user(&store, &store, other.id).await;
        assert!(matches!(taken, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_route_must_be_completed_before_recording() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "a@x.com").await;
        let unit = seed_unit(&store, user.id, "ABC-123").await;
        let mut route = seed_route(&store, unit.id).await;

        let pending = require_route_ready_for_record(&store, &store, route.id).await;
        assert!(matches!(pending, Err(AppError::PreconditionFailed(_))));

        route.transition_to(RouteStatus::InProgress, Utc::now()).unwrap();
        route.transition_to(RouteStatus::Completed, Utc::now()).unwrap();
        RouteRepository::update(&store, &route).await.unwrap();
        assert!(require_route_ready_for_record(&store, &store, route.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_uniqueness_checks_exclude_the_record_itself() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "a@x.com").await;
        let unit = seed_unit(&store, user.id, "ABC-123").await;

        assert!(ensure_email_available(&store, "a@x.com", Some(user.id)).await.is_ok());
        assert!(matches!(
            ensure_email_available(&store, "a@x.com", None).await,
            Err(AppError::Conflict(_))
        ));
        assert!(ensure_license_plate_available(&store, "ABC-123", Some(unit.id)).await.is_ok());
        assert!(matches!(
            ensure_license_plate_available(&store, "ABC-123", None).await,
            Err(AppError::Conflict(_))
        ));
    }
}
