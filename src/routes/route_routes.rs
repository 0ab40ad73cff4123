use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};

use crate::dto::route_dto::{
    CreateRouteRequest, RouteListParams, UpdateRouteRequest, UpdateRouteStatusRequest,
};
use crate::models::route::Route;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route("/:id", get(get_route).patch(update_route).delete(delete_route))
        .route("/:id/status", patch(update_route_status))
}

async fn create_route(
    State(state): State<AppState>,
    payload: Result<Json<CreateRouteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    let Json(request) = payload?;
    let route = state.route_service().create(request).await?;
    Ok((StatusCode::CREATED, Json(route)))
}

async fn list_routes(
    State(state): State<AppState>,
    params: Result<Query<RouteListParams>, QueryRejection>,
) -> Result<Json<Vec<Route>>, AppError> {
    let Query(params) = params?;
    let routes = state.route_service().list(params).await?;
    Ok(Json(routes))
}

async fn get_route(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Route>, AppError> {
    let Path(id) = id?;
    let route = state.route_service().get(id).await?;
    Ok(Json(route))
}

async fn update_route(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateRouteRequest>, JsonRejection>,
) -> Result<Json<Route>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let route = state.route_service().update(id, request).await?;
    Ok(Json(route))
}

async fn update_route_status(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateRouteStatusRequest>, JsonRejection>,
) -> Result<Json<Route>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let route = state.route_service().change_status(id, request.status).await?;
    Ok(Json(route))
}

async fn delete_route(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.route_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
