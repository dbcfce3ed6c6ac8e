//! Capa de base de datos
//!
//! Este módulo contiene el aprovisionamiento del schema de PostgreSQL.

pub mod schema;
