use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.me(user.user_id).await?;
    Ok(Json(response))
}
