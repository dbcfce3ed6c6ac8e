//! DTOs de autenticación

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::User;

/// Request para registrar un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 72))]
    pub password: String,

    #[validate(length(min = 5, max = 20))]
    pub nic: Option<String>,

    #[validate(length(min = 7, max = 20))]
    pub phone_no: Option<String>,
}

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Response de usuario (sin password hash)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone_no: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role,
            phone_no: user.phone_no,
        }
    }
}

/// Response de login/registro con token emitido
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}
