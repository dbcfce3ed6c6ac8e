//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    repositories::user_repository::UserRepository,
    models::user::Role,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{self, JwtConfig},
};

/// Principal autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    // Decodificar y validar JWT
    let claims = jwt::verify_token(auth_header, &JwtConfig::from(&state.config))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))?;

    // Verificar que el usuario existe y sigue activo; el rol se toma de la
    // base, no del token, para que un cambio de rol aplique de inmediato
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized("User is inactive or suspended".to_string()));
    }

    let role = user
        .role()
        .ok_or_else(|| AppError::Unauthorized("User has an unknown role".to_string()))?;

    let authenticated_user = AuthenticatedUser {
        user_id: user.user_id,
        role,
    };

    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}
