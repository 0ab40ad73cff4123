use serde::Deserialize;
use validator::Validate;

use crate::models::user::UserChanges;
use crate::utils::validation::validate_not_blank;

// Request para crear un usuario
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email, length(max = 255))]
    pub email: String,

    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub username: String,

    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub full_name: String,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    // bcrypt sólo considera los primeros 72 bytes
    #[validate(length(min = 6, max = 72))]
    pub password: String,
}

// Request para actualizar un usuario
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email, length(max = 255))]
    pub email: Option<String>,

    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub username: Option<String>,

    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub full_name: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    pub is_active: Option<bool>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            email: request.email,
            username: request.username,
            full_name: request.full_name,
            phone: request.phone,
            is_active: request.is_active,
        }
    }
}
