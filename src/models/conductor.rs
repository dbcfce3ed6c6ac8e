//! Modelo de asignación conductor-bus
//!
//! Resuelve la relación muchos-a-muchos entre conductores y buses.
//! A lo sumo una asignación activa por par (conductor, bus).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Asignación conductor-bus - mapea exactamente a la tabla conductor_bus
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConductorAssignment {
    pub id: Uuid,
    pub conductor_id: Uuid,
    pub bus_id: Uuid,
    pub assigned_by: Uuid,
    pub is_active: bool,
    pub assigned_at: DateTime<Utc>,
}
