use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::bus_controller::BusController;
use crate::dto::bus_dto::{BusResponse, CreateBusRequest, UpdateBusRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_bus_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_bus))
        .route("/:id", get(get_bus))
        .route("/:id", put(update_bus))
        .route("/:id/deactivate", post(deactivate_bus))
        .route("/route/:route_id", get(list_by_route))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_bus(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateBusRequest>,
) -> Result<Json<ApiResponse<BusResponse>>, AppError> {
    let controller = BusController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn get_bus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BusResponse>, AppError> {
    let controller = BusController::new(state.pool.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn list_by_route(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<Vec<BusResponse>>, AppError> {
    let controller = BusController::new(state.pool.clone());
    let response = controller.list_by_route(route_id).await?;
    Ok(Json(response))
}

async fn update_bus(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBusRequest>,
) -> Result<Json<BusResponse>, AppError> {
    let controller = BusController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn deactivate_bus(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = BusController::new(state.pool.clone());
    let response = controller.deactivate(&user, id).await?;
    Ok(Json(response))
}
