//! Controller de autenticación
//!
//! Registro y login con bcrypt + JWT. El registro siempre crea usuarios con
//! rol User; los roles Conductor y Admin se otorgan administrativamente.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::dto::ApiResponse;
use crate::models::user::Role;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{self, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt: JwtConfig::from(config),
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, AppError> {
        request.validate()?;

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self
            .repository
            .create(
                request.name,
                request.email.to_lowercase(),
                password_hash,
                Role::User,
                request.nic,
                request.phone_no,
            )
            .await?;

        let token = jwt::generate_token(user.user_id, Role::User, &self.jwt)?;

        Ok(ApiResponse::success_with_message(
            AuthResponse {
                token,
                user: UserResponse::from(user),
            },
            "User registered successfully".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        // Mismo error para email inexistente y password incorrecta
        let user = self
            .repository
            .find_by_email(&request.email.to_lowercase())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if !valid {
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }

        if !user.is_active {
            return Err(AppError::Unauthorized("User is inactive or suspended".to_string()));
        }

        let role = user
            .role()
            .ok_or_else(|| AppError::Unauthorized("User has an unknown role".to_string()))?;

        let token = jwt::generate_token(user.user_id, role, &self.jwt)?;

        Ok(AuthResponse {
            token,
            user: UserResponse::from(user),
        })
    }

    pub async fn me(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }
}
