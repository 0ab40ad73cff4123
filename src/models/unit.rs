//! Modelo de Unit (vehículo asignado a un conductor)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::AppResult;
use crate::utils::validation::{require_positive, require_valid_year};

/// Unit principal - mapea a la tabla units
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Unit {
    pub id: i64,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub capacity: f64,
    pub user_id: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewUnit {
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub capacity: f64,
    pub user_id: i64,
}

impl NewUnit {
    pub fn validate(&self) -> AppResult<()> {
        require_valid_year(self.year)?;
        require_positive("capacity", self.capacity)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UnitChanges {
    pub license_plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub capacity: Option<f64>,
    pub is_active: Option<bool>,
}

impl Unit {
    /// Valida año y capacidad antes de escribir cualquier campo
    pub fn apply_changes(&mut self, changes: UnitChanges, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(year) = changes.year {
            require_valid_year(year)?;
        }
        if let Some(capacity) = changes.capacity {
            require_positive("capacity", capacity)?;
        }

        if let Some(license_plate) = changes.license_plate {
            self.license_plate = license_plate;
        }
        if let Some(brand) = changes.brand {
            self.brand = brand;
        }
        if let Some(model) = changes.model {
            self.model = model;
        }
        if let Some(year) = changes.year {
            self.year = year;
        }
        if let Some(capacity) = changes.capacity {
            self.capacity = capacity;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Some(now);
        Ok(())
    }
}
