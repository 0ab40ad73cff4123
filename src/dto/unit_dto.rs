use serde::Deserialize;
use validator::Validate;

use crate::models::unit::{NewUnit, UnitChanges};
use crate::utils::validation::validate_not_blank;

// Request para crear una unidad
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUnitRequest {
    #[validate(length(max = 20), custom = "validate_not_blank")]
    pub license_plate: String,

    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub brand: String,

    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub model: String,

    // Año y capacidad se validan como reglas de negocio (InvalidInput)
    pub year: i32,
    pub capacity: f64,
    pub user_id: i64,
}

// Request para actualizar una unidad; el conductor asignado no cambia
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUnitRequest {
    #[validate(length(max = 20), custom = "validate_not_blank")]
    pub license_plate: Option<String>,

    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub brand: Option<String>,

    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub model: Option<String>,

    pub year: Option<i32>,
    pub capacity: Option<f64>,
    pub is_active: Option<bool>,
}

impl From<CreateUnitRequest> for NewUnit {
    fn from(request: CreateUnitRequest) -> Self {
        Self {
            license_plate: request.license_plate,
            brand: request.brand,
            model: request.model,
            year: request.year,
            capacity: request.capacity,
            user_id: request.user_id,
        }
    }
}

impl From<UpdateUnitRequest> for UnitChanges {
    fn from(request: UpdateUnitRequest) -> Self {
        Self {
            license_plate: request.license_plate,
            brand: request.brand,
            model: request.model,
            year: request.year,
            capacity: request.capacity,
            is_active: request.is_active,
        }
    }
}
