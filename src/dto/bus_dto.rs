//! DTOs de administración de buses y rutas
//!
//! Los structs de update son explícitos por entidad: sus campos son la
//! allow-list de columnas actualizables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::bus::Bus;
use crate::models::route::Route;

/// Request para registrar un bus
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusRequest {
    #[validate(length(min = 3, max = 50))]
    pub registration_number: String,

    pub route_id: Uuid,

    pub owner_id: Option<Uuid>,

    #[validate(range(min = 1, max = 100))]
    pub seat_count: i32,

    pub service: String,
}

/// Request para actualizar un bus existente
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusRequest {
    #[validate(length(min = 3, max = 50))]
    pub registration_number: Option<String>,

    pub route_id: Option<Uuid>,

    #[validate(range(min = 1, max = 100))]
    pub seat_count: Option<i32>,

    pub service: Option<String>,
}

/// Request para crear una ruta
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 255))]
    pub start_point: String,

    #[validate(length(min = 1, max = 255))]
    pub end_point: String,

    pub price: Decimal,

    pub distance_km: Decimal,
}

/// Request para la actualización administrativa de una ruta
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRouteRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,

    pub price: Option<Decimal>,

    pub distance_km: Option<Decimal>,
}

/// Response de bus para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusResponse {
    pub bus_id: String,
    pub registration_number: String,
    pub route_id: String,
    pub owner_id: Option<String>,
    pub seat_count: i32,
    pub service: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<Bus> for BusResponse {
    fn from(bus: Bus) -> Self {
        Self {
            bus_id: bus.bus_id.to_string(),
            registration_number: bus.registration_number,
            route_id: bus.route_id.to_string(),
            owner_id: bus.owner_id.map(|id| id.to_string()),
            seat_count: bus.seat_count,
            service: bus.service,
            is_active: bus.is_active,
            created_at: bus.created_at.to_rfc3339(),
        }
    }
}

/// Response de ruta para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub route_id: String,
    pub name: String,
    pub start_point: String,
    pub end_point: String,
    pub price: String,
    pub distance_km: String,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            route_id: route.route_id.to_string(),
            name: route.name,
            start_point: route.start_point,
            end_point: route.end_point,
            price: route.price.to_string(),
            distance_km: route.distance_km.to_string(),
        }
    }
}
