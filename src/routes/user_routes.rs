use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::pagination::PaginationParams;
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::models::unit::Unit;
use crate::models::user::UserResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
        .route("/:id/units", get(list_user_units))
}

async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(request) = payload?;
    let user = state.user_service().create(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let Query(params) = params?;
    let users = state.user_service().list(params).await?;
    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Path(id) = id?;
    let user = state.user_service().get(id).await?;
    Ok(Json(user))
}

async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let user = state.user_service().update(id, request).await?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.user_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_user_units(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<Unit>>, AppError> {
    let Path(id) = id?;
    let Query(params) = params?;
    let units = state.unit_service().list_by_user(id, params).await?;
    Ok(Json(units))
}
