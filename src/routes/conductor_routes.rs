use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::conductor_controller::ConductorController;
use crate::dto::conductor_dto::{AssignConductorRequest, AssignmentResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_conductor_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/assign", post(assign_conductor))
        .route("/:id/deactivate", post(deactivate_assignment))
        .route("/bus/:bus_id", get(list_by_bus))
        .route("/conductor/:conductor_id", get(list_by_conductor))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn assign_conductor(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<AssignConductorRequest>,
) -> Result<Json<ApiResponse<AssignmentResponse>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    let response = controller.assign(&user, request).await?;
    Ok(Json(response))
}

async fn deactivate_assignment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    let response = controller.deactivate(&user, id).await?;
    Ok(Json(response))
}

async fn list_by_bus(
    State(state): State<AppState>,
    Path(bus_id): Path<Uuid>,
) -> Result<Json<Vec<AssignmentResponse>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    let response = controller.list_by_bus(bus_id).await?;
    Ok(Json(response))
}

async fn list_by_conductor(
    State(state): State<AppState>,
    Path(conductor_id): Path<Uuid>,
) -> Result<Json<Vec<AssignmentResponse>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    let response = controller.list_by_conductor(conductor_id).await?;
    Ok(Json(response))
}
