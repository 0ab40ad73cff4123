use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::performance::{NewPerformanceRecord, PerformanceRecord};
use crate::repositories::Page;
use crate::utils::errors::{not_found_error, AppResult};

#[async_trait]
pub trait PerformanceRepository: Send + Sync {
    async fn create(&self, record: NewPerformanceRecord) -> AppResult<PerformanceRecord>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<PerformanceRecord>>;
    async fn find_by_route(&self, route_id: i64) -> AppResult<Option<PerformanceRecord>>;
    async fn list(&self, page: Page) -> AppResult<Vec<PerformanceRecord>>;
    async fn update(&self, record: &PerformanceRecord) -> AppResult<PerformanceRecord>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

pub struct PgPerformanceRepository {
    pool: PgPool,
}

impl PgPerformanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PerformanceRepository for PgPerformanceRepository {
    async fn create(&self, record: NewPerformanceRecord) -> AppResult<PerformanceRecord> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, PerformanceRecord>(
            r#"
            INSERT INTO performance_records (
                route_id, distance_traveled_km, fuel_consumed_liters, actual_time_hours,
                average_speed_kmh, fuel_efficiency_km_per_liter, time_efficiency, efficiency_score,
                notes, recorded_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING *
            "#,
        )
        .bind(record.route_id)
        .bind(record.measurements.distance_traveled_km)
        .bind(record.measurements.fuel_consumed_liters)
        .bind(record.measurements.actual_time_hours)
        .bind(record.metrics.average_speed_kmh)
        .bind(record.metrics.fuel_efficiency_km_per_liter)
        .bind(record.metrics.time_efficiency)
        .bind(record.metrics.efficiency_score)
        .bind(record.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<PerformanceRecord>> {
        let record = sqlx::query_as::<_, PerformanceRecord>(
            "SELECT * FROM performance_records WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_route(&self, route_id: i64) -> AppResult<Option<PerformanceRecord>> {
        let record = sqlx::query_as::<_, PerformanceRecord>(
            "SELECT * FROM performance_records WHERE route_id = $1",
        )
        .bind(route_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self, page: Page) -> AppResult<Vec<PerformanceRecord>> {
        let records = sqlx::query_as::<_, PerformanceRecord>(
            "SELECT * FROM performance_records ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(page.offset)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn update(&self, record: &PerformanceRecord) -> AppResult<PerformanceRecord> {
        let updated = sqlx::query_as::<_, PerformanceRecord>(
            r#"
            UPDATE performance_records
            SET distance_traveled_km = $2, fuel_consumed_liters = $3, actual_time_hours = $4,
                average_speed_kmh = $5, fuel_efficiency_km_per_liter = $6,
                time_efficiency = $7, efficiency_score = $8, notes = $9, updated_at = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.distance_traveled_km)
        .bind(record.fuel_consumed_liters)
        .bind(record.actual_time_hours)
        .bind(record.average_speed_kmh)
        .bind(record.fuel_efficiency_km_per_liter)
        .bind(record.time_efficiency)
        .bind(record.efficiency_score)
        .bind(&record.notes)
        .bind(record.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| not_found_error("Performance record", record.id))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM performance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
