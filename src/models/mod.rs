//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod booking;
pub mod bus;
pub mod conductor;
pub mod route;
pub mod user;
