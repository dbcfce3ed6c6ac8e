use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::directory_controller::DirectoryController;
use crate::dto::directory_dto::{BusWithRouteResponse, RouteBusesQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_directory_router() -> Router<AppState> {
    Router::new()
        .route("/start-points", get(start_points))
        .route("/end-points", get(end_points))
        .route("/buses", get(buses_by_route))
}

async fn start_points(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let controller = DirectoryController::new(state.pool.clone());
    let response = controller.start_points().await?;
    Ok(Json(response))
}

async fn end_points(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let controller = DirectoryController::new(state.pool.clone());
    let response = controller.end_points().await?;
    Ok(Json(response))
}

async fn buses_by_route(
    State(state): State<AppState>,
    Query(query): Query<RouteBusesQuery>,
) -> Result<Json<Vec<BusWithRouteResponse>>, AppError> {
    let controller = DirectoryController::new(state.pool.clone());
    let response = controller.buses_by_route(query).await?;
    Ok(Json(response))
}
