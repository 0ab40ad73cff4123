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
use crate::dto::performance_dto::{CreatePerformanceRequest, UpdatePerformanceRequest};
use crate::models::performance::PerformanceRecord;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_performance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_performance).post(create_performance))
        .route(
            "/:id",
            get(get_performance)
                .patch(update_performance)
                .delete(delete_performance),
        )
        .route("/route/:route_id", get(get_performance_by_route))
}

async fn create_performance(
    State(state): State<AppState>,
    payload: Result<Json<CreatePerformanceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PerformanceRecord>), AppError> {
    let Json(request) = payload?;
    let record = state.performance_service().create(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_performance(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<PerformanceRecord>>, AppError> {
    let Query(params) = params?;
    let records = state.performance_service().list(params).await?;
    Ok(Json(records))
}

async fn get_performance(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PerformanceRecord>, AppError> {
    let Path(id) = id?;
    let record = state.performance_service().get(id).await?;
    Ok(Json(record))
}

async fn get_performance_by_route(
    State(state): State<AppState>,
    route_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PerformanceRecord>, AppError> {
    let Path(route_id) = route_id?;
    let record = state.performance_service().get_by_route(route_id).await?;
    Ok(Json(record))
}

async fn update_performance(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdatePerformanceRequest>, JsonRejection>,
) -> Result<Json<PerformanceRecord>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let record = state.performance_service().update(id, request).await?;
    Ok(Json(record))
}

async fn delete_performance(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.performance_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
