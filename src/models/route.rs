//! Modelo de Route
//!
//! Una ruta conecta un punto de origen con uno de destino; el par
//! (start_point, end_point) es único.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub route_id: Uuid,
    pub name: String,
    pub start_point: String,
    pub end_point: String,
    pub price: Decimal,
    pub distance_km: Decimal,
    pub created_at: DateTime<Utc>,
}
