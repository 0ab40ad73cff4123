//! Casos de uso de unidades (vehículos)

use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::dto::pagination::PaginationParams;
use crate::dto::unit_dto::{CreateUnitRequest, UpdateUnitRequest};
use crate::models::unit::{NewUnit, Unit};
use crate::repositories::Repositories;
use crate::services::business_rules::{ensure_license_plate_available, require_assignable_user};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct UnitService {
    repos: Repositories,
}

impl UnitService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create(&self, request: CreateUnitRequest) -> AppResult<Unit> {
        request.validate()?;

        require_assignable_user(
            self.repos.users.as_ref(),
            self.repos.units.as_ref(),
            request.user_id,
        )
        .await?;
        ensure_license_plate_available(self.repos.units.as_ref(), &request.license_plate, None)
            .await?;

        let new_unit = NewUnit::from(request);
        new_unit.validate()?;

        let unit = self.repos.units.create(new_unit).await?;
        info!(
            "🚚 Unidad creada: {} ({}) para usuario {}",
            unit.id, unit.license_plate, unit.user_id
        );
        Ok(unit)
    }

    pub async fn get(&self, id: i64) -> AppResult<Unit> {
        self.repos
            .units
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Unit", id))
    }

    pub async fn list(&self, params: PaginationParams) -> AppResult<Vec<Unit>> {
        params.validate()?;
        self.repos.units.list(params.page()).await
    }

    /// Unidades del usuario; 404 si el usuario no existe
    pub async fn list_by_user(&self, user_id: i64, params: PaginationParams) -> AppResult<Vec<Unit>> {
        params.validate()?;
        if self.repos.users.find_by_id(user_id).await?.is_none() {
            return Err(not_found_error("User", user_id));
        }
        self.repos.units.list_by_user(user_id, params.page()).await
    }

    pub async fn update(&self, id: i64, request: UpdateUnitRequest) -> AppResult<Unit> {
        request.validate()?;
        let mut unit = self.get(id).await?;

        if let Some(license_plate) = &request.license_plate {
            ensure_license_plate_available(self.repos.units.as_ref(), license_plate, Some(id))
                .await?;
        }

        unit.apply_changes(request.into(), Utc::now())?;
        let updated = self.repos.units.update(&unit).await?;

        info!("🚚 Unidad actualizada: {}", updated.id);
        Ok(updated)
    }

    /// Una unidad con rutas asociadas no se puede eliminar
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.get(id).await?;
        if self.repos.routes.count_by_unit(id).await? > 0 {
            return Err(AppError::Conflict(format!(
                "Unit with id '{}' still has routes",
                id
            )));
        }

        if !self.repos.units.delete(id).await? {
            return Err(not_found_error("Unit", id));
        }

        info!("🗑️ Unidad eliminada: {}", id);
        Ok(())
    }
}
