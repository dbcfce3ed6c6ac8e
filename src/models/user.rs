//! Modelo de User
//!
//! Este módulo contiene el struct User y el rol del principal autenticado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rol del usuario dentro del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Conductor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Conductor => "Conductor",
            Role::Admin => "Admin",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value.to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "conductor" => Some(Role::Conductor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Solo conductores y administradores pueden marcar reservas como completadas
    pub fn can_complete_bookings(&self) -> bool {
        matches!(self, Role::Conductor | Role::Admin)
    }
}

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub nic: Option<String>,
    pub phone_no: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("User"), Some(Role::User));
        assert_eq!(Role::parse("conductor"), Some(Role::Conductor));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_role_can_complete_bookings() {
        assert!(Role::Conductor.can_complete_bookings());
        assert!(Role::Admin.can_complete_bookings());
        assert!(!Role::User.can_complete_bookings());
    }
}
