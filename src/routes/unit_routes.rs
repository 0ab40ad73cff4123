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
use crate::dto::unit_dto::{CreateUnitRequest, UpdateUnitRequest};
use crate::models::unit::Unit;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_unit_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_units).post(create_unit))
        .route("/:id", get(get_unit).patch(update_unit).delete(delete_unit))
}

async fn create_unit(
    State(state): State<AppState>,
    payload: Result<Json<CreateUnitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Unit>), AppError> {
    let Json(request) = payload?;
    let unit = state.unit_service().create(request).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

async fn list_units(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<Unit>>, AppError> {
    let Query(params) = params?;
    let units = state.unit_service().list(params).await?;
    Ok(Json(units))
}

async fn get_unit(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Unit>, AppError> {
    let Path(id) = id?;
    let unit = state.unit_service().get(id).await?;
    Ok(Json(unit))
}

async fn update_unit(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateUnitRequest>, JsonRejection>,
) -> Result<Json<Unit>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let unit = state.unit_service().update(id, request).await?;
    Ok(Json(unit))
}

async fn delete_unit(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.unit_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
