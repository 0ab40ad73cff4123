//! Casos de uso de usuarios (conductores)

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::dto::pagination::PaginationParams;
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::models::user::{NewUser, UserResponse};
use crate::repositories::Repositories;
use crate::services::business_rules::ensure_email_available;
use crate::services::password_service::PasswordHasher;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct UserService {
    repos: Repositories,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repos: Repositories, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repos, hasher }
    }

    pub async fn create(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        request.validate()?;
        ensure_email_available(self.repos.users.as_ref(), &request.email, None).await?;

        let hashed_password = self.hasher.hash(&request.password).await?;
        let user = self
            .repos
            .users
            .create(NewUser {
                email: request.email,
                username: request.username,
                full_name: request.full_name,
                phone: request.phone,
                hashed_password,
            })
            .await?;

        info!("👤 Usuario creado: {} ({})", user.id, user.email);
        Ok(user.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<UserResponse> {
        self.repos
            .users
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| not_found_error("User", id))
    }

    pub async fn list(&self, params: PaginationParams) -> AppResult<Vec<UserResponse>> {
        params.validate()?;
        let users = self.repos.users.list(params.page()).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> AppResult<UserResponse> {
        request.validate()?;
        let mut user = self
            .repos
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", id))?;

        if let Some(email) = &request.email {
            ensure_email_available(self.repos.users.as_ref(), email, Some(id)).await?;
        }

        user.apply_changes(request.into(), Utc::now());
        let updated = self.repos.users.update(&user).await?;

        info!("👤 Usuario actualizado: {}", updated.id);
        Ok(updated.into())
    }

    /// Un usuario con unidad asignada no se puede eliminar
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if self.repos.users.find_by_id(id).await?.is_none() {
            return Err(not_found_error("User", id));
        }
        if self.repos.units.count_by_user(id).await? > 0 {
            return Err(AppError::Conflict(format!(
                "User with id '{}' still has a unit assigned",
                id
            )));
        }

        if !self.repos.users.delete(id).await? {
            return Err(not_found_error("User", id));
        }

        info!("🗑️ Usuario eliminado: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{create_user_request, fixture};
    use crate::dto::unit_dto::CreateUnitRequest;

    #[tokio::test]
    async fn test_create_hashes_password_and_hides_it() {
        let fx = fixture();
        let created = fx.users.create(create_user_request("a@x.com")).await.unwrap();

        assert_eq!(created.email, "a@x.com");
        assert!(created.is_active);

        let stored = fx.repos.users.find_by_id(created.id).await.unwrap().unwrap();
        assert_ne!(stored.hashed_password, "secreto123");
        assert!(bcrypt::verify("secreto123", &stored.hashed_password).unwrap());

        let body = serde_json::to_value(&created).unwrap();
        assert!(body.get("hashed_password").is_none());
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let fx = fixture();
        fx.users.create(create_user_request("a@x.com")).await.unwrap();

        let err = fx.users.create(create_user_request("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_storage() {
        let fx = fixture();
        let mut request = create_user_request("a@x.com");
        request.password = "123".to_string();

        let err = fx.users.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(fx.users.list(PaginationParams::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_checks_email_against_other_users() {
        let fx = fixture();
        let first = fx.users.create(create_user_request("a@x.com")).await.unwrap();
        fx.users.create(create_user_request("b@x.com")).await.unwrap();

        // Reusar el propio email no es conflicto
        let same = UpdateUserRequest {
            email: Some("a@x.com".to_string()),
            full_name: Some("Ana María".to_string()),
            ..Default::default()
        };
        let updated = fx.users.update(first.id, same).await.unwrap();
        assert_eq!(updated.full_name, "Ana María");
        assert!(updated.updated_at.is_some());

        let taken = UpdateUserRequest {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        };
        let err = fx.users.update(first.id, taken).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_is_blocked_while_a_unit_is_assigned() {
        let fx = fixture();
        let user = fx.users.create(create_user_request("a@x.com")).await.unwrap();
        let unit = fx
            .units
            .create(CreateUnitRequest {
                license_plate: "ABC-123".to_string(),
                brand: "Isuzu".to_string(),
                model: "ELF".to_string(),
                year: 2020,
                capacity: 3.5,
                user_id: user.id,
            })
            .await
            .unwrap();

        let err = fx.users.delete(user.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        fx.units.delete(unit.id).await.unwrap();
        fx.users.delete(user.id).await.unwrap();
        assert!(matches!(fx.users.get(user.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let fx = fixture();
        assert!(matches!(fx.users.get(42).await, Err(AppError::NotFound(_))));
        assert!(matches!(fx.users.delete(42).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            fx.users.update(42, UpdateUserRequest::default()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
