use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::unit::{NewUnit, Unit};
use crate::repositories::Page;
use crate::utils::errors::{not_found_error, AppResult};

#[async_trait]
pub trait UnitRepository: Send + Sync {
    async fn create(&self, unit: NewUnit) -> AppResult<Unit>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Unit>>;
    async fn license_plate_exists(&self, license_plate: &str, exclude_id: Option<i64>) -> AppResult<bool>;
    async fn list(&self, page: Page) -> AppResult<Vec<Unit>>;
    async fn list_by_user(&self, user_id: i64, page: Page) -> AppResult<Vec<Unit>>;
    async fn count_by_user(&self, user_id: i64) -> AppResult<i64>;
    async fn update(&self, unit: &Unit) -> AppResult<Unit>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

pub struct PgUnitRepository {
    pool: PgPool,
}

impl PgUnitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitRepository for PgUnitRepository {
    async fn create(&self, unit: NewUnit) -> AppResult<Unit> {
        let created = sqlx::query_as::<_, Unit>(
            r#"
            INSERT INTO units (license_plate, brand, model, year, capacity, user_id, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
            RETURNING *
            "#,
        )
        .bind(unit.license_plate)
        .bind(unit.brand)
        .bind(unit.model)
        .bind(unit.year)
        .bind(unit.capacity)
        .bind(unit.user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Unit>> {
        let unit = sqlx::query_as::<_, Unit>("SELECT * FROM units WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(unit)
    }

    async fn license_plate_exists(&self, license_plate: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM units WHERE license_plate = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(license_plate)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn list(&self, page: Page) -> AppResult<Vec<Unit>> {
        let units = sqlx::query_as::<_, Unit>("SELECT * FROM units ORDER BY id OFFSET $1 LIMIT $2")
            .bind(page.offset)
            .bind(page.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(units)
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> AppResult<Vec<Unit>> {
        let units = sqlx::query_as::<_, Unit>(
            "SELECT * FROM units WHERE user_id = $1 ORDER BY id OFFSET $2 LIMIT $3",
        )
        .bind(user_id)
        .bind(page.offset)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(units)
    }

    async fn count_by_user(&self, user_id: i64) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM units WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn update(&self, unit: &Unit) -> AppResult<Unit> {
        let updated = sqlx::query_as::<_, Unit>(
            r#"
            UPDATE units
            SET license_plate = $2, brand = $3, model = $4, year = $5, capacity = $6,
                is_active = $7, updated_at = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(unit.id)
        .bind(&unit.license_plate)
        .bind(&unit.brand)
        .bind(&unit.model)
        .bind(unit.year)
        .bind(unit.capacity)
        .bind(unit.is_active)
        .bind(unit.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| not_found_error("Unit", unit.id))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
