use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::route::{NewRoute, Route, RouteFilter, RouteStatus};
use crate::repositories::Page;
use crate::utils::errors::{not_found_error, AppResult};

#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Inserta la ruta en estado ASIGNADA
    async fn create(&self, route: NewRoute) -> AppResult<Route>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Route>>;
    async fn list(&self, filter: RouteFilter, page: Page) -> AppResult<Vec<Route>>;
    async fn count_by_unit(&self, unit_id: i64) -> AppResult<i64>;
    async fn update(&self, route: &Route) -> AppResult<Route>;
    /// Borra también el registro de rendimiento de la ruta
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

pub struct PgRouteRepository {
    pool: PgPool,
}

impl PgRouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RouteRepository for PgRouteRepository {
    async fn create(&self, route: NewRoute) -> AppResult<Route> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (origin, destination, distance_km, estimated_time_hours, status, unit_id, assigned_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(route.origin)
        .bind(route.destination)
        .bind(route.distance_km)
        .bind(route.estimated_time_hours)
        .bind(RouteStatus::Assigned)
        .bind(route.unit_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Route>> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    async fn list(&self, filter: RouteFilter, page: Page) -> AppResult<Vec<Route>> {
        let routes = sqlx::query_as::<_, Route>(
            r#"
            SELECT * FROM routes
            WHERE ($1::route_status IS NULL OR status = $1)
              AND ($2::BIGINT IS NULL OR unit_id = $2)
            ORDER BY id
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(filter.status)
        .bind(filter.unit_id)
        .bind(page.offset)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    async fn count_by_unit(&self, unit_id: i64) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM routes WHERE unit_id = $1")
            .bind(unit_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn update(&self, route: &Route) -> AppResult<Route> {
        let updated = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET origin = $2, destination = $3, distance_km = $4, estimated_time_hours = $5,
                status = $6, started_at = $7, completed_at = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(route.id)
        .bind(&route.origin)
        .bind(&route.destination)
        .bind(route.distance_km)
        .bind(route.estimated_time_hours)
        .bind(route.status)
        .bind(route.started_at)
        .bind(route.completed_at)
        .bind(route.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| not_found_error("Route", route.id))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        // performance_records.route_id tiene ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
