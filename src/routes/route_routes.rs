use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_controller::RouteController;
use crate::dto::bus_dto::{CreateRouteRequest, RouteResponse, UpdateRouteRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_route))
        .route("/", get(list_routes))
        .route("/:id", get(get_route))
        .route("/:id", put(update_route))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_route(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_routes(State(state): State<AppState>) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn update_route(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}
