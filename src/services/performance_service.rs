//! Casos de uso de registros de rendimiento
//!
//! Las métricas derivadas se calculan aquí y se guardan junto a las
//! mediciones; nunca se aceptan desde el cliente.

use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::dto::pagination::PaginationParams;
use crate::dto::performance_dto::{CreatePerformanceRequest, UpdatePerformanceRequest};
use crate::models::performance::{NewPerformanceRecord, PerformanceChanges, PerformanceRecord};
use crate::repositories::Repositories;
use crate::services::business_rules::require_route_ready_for_record;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct PerformanceService {
    repos: Repositories,
}

impl PerformanceService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create(&self, request: CreatePerformanceRequest) -> AppResult<PerformanceRecord> {
        request.validate()?;
        let route = require_route_ready_for_record(
            self.repos.routes.as_ref(),
            self.repos.performance.as_ref(),
            request.route_id,
        )
        .await?;

        let measurements = request.measurements();
        measurements.validate()?;
        let metrics = measurements.metrics(route.estimated_time_hours);

        let record = self
            .repos
            .performance
            .create(NewPerformanceRecord {
                route_id: route.id,
                measurements,
                metrics,
                notes: request.notes,
            })
            .await?;

        info!(
            "📊 Rendimiento registrado para ruta {}: score {}",
            record.route_id, record.efficiency_score
        );
        Ok(record)
    }

    pub async fn get(&self, id: i64) -> AppResult<PerformanceRecord> {
        self.repos
            .performance
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Performance record", id))
    }

    /// 404 tanto si la ruta no existe como si aún no tiene registro
    pub async fn get_by_route(&self, route_id: i64) -> AppResult<PerformanceRecord> {
        if self.repos.routes.find_by_id(route_id).await?.is_none() {
            return Err(not_found_error("Route", route_id));
        }
        self.repos
            .performance
            .find_by_route(route_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Performance record for route '{}' not found",
                    route_id
                ))
            })
    }

    pub async fn list(&self, params: PaginationParams) -> AppResult<Vec<PerformanceRecord>> {
        params.validate()?;
        self.repos.performance.list(params.page()).await
    }

    /// Si cambia alguna medición se recalculan las métricas con el tiempo
    /// estimado vigente de la ruta
    pub async fn update(
        &self,
        id: i64,
        request: UpdatePerformanceRequest,
    ) -> AppResult<PerformanceRecord> {
        request.validate()?;
        let mut record = self.get(id).await?;
        let changes = PerformanceChanges::from(request);
        let now = Utc::now();

        if changes.touches_measurements() {
            let route = self
                .repos
                .routes
                .find_by_id(record.route_id)
                .await?
                .ok_or_else(|| not_found_error("Route", record.route_id))?;
            let measurements = record.merged_measurements(&changes);
            record.set_measurements(measurements, route.estimated_time_hours, now)?;
        }
        if let Some(notes) = changes.notes {
            record.set_notes(notes, now);
        }

        let updated = self.repos.performance.update(&record).await?;
        info!("📊 Rendimiento actualizado: {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repos.performance.delete(id).await? {
            return Err(not_found_error("Performance record", id));
        }

        info!("🗑️ Rendimiento eliminado: {}", id);
        Ok(())
    }
}
