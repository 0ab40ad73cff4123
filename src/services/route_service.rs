//! Casos de uso de rutas
//!
//! Las transiciones de estado pasan siempre por `Route::transition_to`;
//! el servicio sólo carga, aplica y persiste.

use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::dto::route_dto::{CreateRouteRequest, RouteListParams, UpdateRouteRequest};
use crate::models::route::{NewRoute, Route, RouteStatus};
use crate::repositories::Repositories;
use crate::services::business_rules::require_active_unit;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::require_positive;

pub struct RouteService {
    repos: Repositories,
}

impl RouteService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Crea la ruta en estado ASIGNADA
    pub async fn create(&self, request: CreateRouteRequest) -> AppResult<Route> {
        request.validate()?;
        require_active_unit(self.repos.units.as_ref(), request.unit_id).await?;
        require_positive("distance_km", request.distance_km)?;
        require_positive("estimated_time_hours", request.estimated_time_hours)?;

        let route = self.repos.routes.create(NewRoute::from(request)).await?;
        info!(
            "🗺️ Ruta creada: {} ({} → {}) unidad {}",
            route.id, route.origin, route.destination, route.unit_id
        );
        Ok(route)
    }

    pub async fn get(&self, id: i64) -> AppResult<Route> {
        self.repos
            .routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Route", id))
    }

    /// Filtrar por una unidad inexistente es 404, no una lista vacía
    pub async fn list(&self, params: RouteListParams) -> AppResult<Vec<Route>> {
        params.validate()?;
        if let Some(unit_id) = params.unit_id {
            if self.repos.units.find_by_id(unit_id).await?.is_none() {
                return Err(not_found_error("Unit", unit_id));
            }
        }
        self.repos
            .routes
            .list(params.filter(), params.pagination().page())
            .await
    }

    pub async fn update(&self, id: i64, request: UpdateRouteRequest) -> AppResult<Route> {
        request.validate()?;
        let mut route = self.get(id).await?;

        route.apply_changes(request.into(), Utc::now())?;
        let updated = self.repos.routes.update(&route).await?;

        info!("🗺️ Ruta actualizada: {}", updated.id);
        Ok(updated)
    }

    pub async fn change_status(&self, id: i64, status: RouteStatus) -> AppResult<Route> {
        let mut route = self.get(id).await?;
        let previous = route.status;

        route.transition_to(status, Utc::now())?;
        let updated = self.repos.routes.update(&route).await?;

        info!("🔄 Ruta {}: {} → {}", updated.id, previous, updated.status);
        Ok(updated)
    }

    /// Una ruta EN_RUTA no se puede eliminar; el registro de rendimiento cae en cascada
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let route = self.get(id).await?;
        if route.status == RouteStatus::InProgress {
            return Err(AppError::InvalidState(format!(
                "Route with id '{}' is {} and cannot be deleted",
                id, route.status
            )));
        }

        if !self.repos.routes.delete(id).await? {
            return Err(not_found_error("Route", id));
        }

        info!("🗑️ Ruta eliminada: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::unit_dto::UpdateUnitRequest;
    use crate::repositories::Page;
    use crate::services::test_support::{
        create_performance_request, create_route_request, fixture, seeded_unit, Fixture,
    };

    fn list_params(status: Option<RouteStatus>, unit_id: Option<i64>) -> RouteListParams {
        RouteListParams {
            status,
            unit_id,
            offset: 0,
            limit: 100,
        }
    }

    async fn completed_route(fx: &Fixture, unit_id: i64) -> Route {
        let route = fx.routes.create(create_route_request(unit_id)).await.unwrap();
        fx.routes.change_status(route.id, RouteStatus::InProgress).await.unwrap();
        fx.routes.change_status(route.id, RouteStatus::Completed).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_starts_assigned() {
        let fx = fixture();
        let unit = seeded_unit(&fx).await;

        let route = fx.routes.create(create_route_request(unit.id)).await.unwrap();
        assert_eq!(route.status, RouteStatus::Assigned);
        assert!(route.started_at.is_none());
        assert!(route.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_create_requires_active_unit_and_positive_values() {
        let fx = fixture();
        assert!(matches!(
            fx.routes.create(create_route_request(99)).await,
            Err(AppError::NotFound(_))
        ));

        let unit = seeded_unit(&fx).await;
        let mut request = create_route_request(unit.id);
        request.distance_km = -5.0;
        assert!(matches!(fx.routes.create(request).await, Err(AppError::InvalidInput(_))));

        let deactivate = UpdateUnitRequest {
            is_active: Some(false),
            ..Default::default()
        };
        fx.units.update(unit.id, deactivate).await.unwrap();
        assert!(matches!(
            fx.routes.create(create_route_request(unit.id)).await,
            Err(AppError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_lifecycle_stamps_timestamps() {
        let fx = fixture();
        let unit = seeded_unit(&fx).await;
        let route = fx.routes.create(create_route_request(unit.id)).await.unwrap();

        let started = fx.routes.change_status(route.id, RouteStatus::InProgress).await.unwrap();
        assert_eq!(started.status, RouteStatus::InProgress);
        assert!(started.started_at.is_some());

        let completed = fx.routes.change_status(route.id, RouteStatus::Completed).await.unwrap();
        assert!(completed.completed_at.is_some());
        assert_eq!(completed.started_at, started.started_at);
        assert_eq!(fx.routes.get(route.id).await.unwrap(), completed);
    }

    #[tokio::test]
    async fn test_skipping_in_progress_is_an_invalid_transition() {
        let fx = fixture();
        let unit = seeded_unit(&fx).await;
        let route = fx.routes.create(create_route_request(unit.id)).await.unwrap();

        let err = fx
            .routes
            .change_status(route.id, RouteStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTransition {
                from: RouteStatus::Assigned,
                to: RouteStatus::Completed
            }
        ));
        assert_eq!(fx.routes.get(route.id).await.unwrap().status, RouteStatus::Assigned);
    }

    #[tokio::test]
    async fn test_completed_route_rejects_updates() {
        let fx = fixture();
        let unit = seeded_unit(&fx).await;
        let route = completed_route(&fx, unit.id).await;

        let change = UpdateRouteRequest {
            origin: Some("Apodaca".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            fx.routes.update(route.id, change).await,
            Err(AppError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_route_still_accepts_field_updates() {
        let fx = fixture();
        let unit = seeded_unit(&fx).await;
        let route = fx.routes.create(create_route_request(unit.id)).await.unwrap();
        fx.routes.change_status(route.id, RouteStatus::Cancelled).await.unwrap();

        let change = UpdateRouteRequest {
            destination: Some("Saltillo Centro".to_string()),
            ..Default::default()
        };
        let updated = fx.routes.update(route.id, change).await.unwrap();
        assert_eq!(updated.destination, "Saltillo Centro");
        assert_eq!(updated.status, RouteStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let fx = fixture();
        let unit = seeded_unit(&fx).await;
        let route = fx.routes.create(create_route_request(unit.id)).await.unwrap();
        fx.routes.change_status(route.id, RouteStatus::InProgress).await.unwrap();

        assert!(matches!(fx.routes.delete(route.id).await, Err(AppError::InvalidState(_))));

        fx.routes.change_status(route.id, RouteStatus::Completed).await.unwrap();
        let record = fx
            .performance
            .create(create_performance_request(route.id))
            .await
            .unwrap();

        fx.routes.delete(route.id).await.unwrap();
        assert!(matches!(fx.routes.get(route.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(fx.performance.get(record.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filters() {
        let fx = fixture();
        let unit = seeded_unit(&fx).await;
        let first = fx.routes.create(create_route_request(unit.id)).await.unwrap();
        fx.routes.create(create_route_request(unit.id)).await.unwrap();
        fx.routes.change_status(first.id, RouteStatus::InProgress).await.unwrap();

        let all = fx.routes.list(list_params(None, Some(unit.id))).await.unwrap();
        assert_eq!(all.len(), 2);

        let in_progress = fx
            .routes
            .list(list_params(Some(RouteStatus::InProgress), None))
            .await
            .unwrap();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].id, first.id);

        let missing_unit = fx.routes.list(list_params(None, Some(99))).await;
        assert!(matches!(missing_unit, Err(AppError::NotFound(_))));

        let mut bad_page = list_params(None, None);
        bad_page.limit = 0;
        assert!(matches!(fx.routes.list(bad_page).await, Err(AppError::Validation(_))));

        let page = list_params(None, None).pagination().page();
        assert_eq!(page, Page::default());
    }
}
