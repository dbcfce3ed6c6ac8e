//! DTOs del directorio de rutas y buses

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::repositories::route_repository::BusWithRoute;

/// Query para buscar buses de una ruta por origen y destino
#[derive(Debug, Deserialize, Validate)]
pub struct RouteBusesQuery {
    #[validate(length(min = 1, max = 255))]
    pub start: String,

    #[validate(length(min = 1, max = 255))]
    pub end: String,
}

/// Un bus con los datos de su ruta
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusWithRouteResponse {
    pub bus_id: String,
    pub registration_number: String,
    pub seat_count: i32,
    pub service: String,
    pub route_name: String,
    pub start_point: String,
    pub end_point: String,
    pub price: String,
    pub distance_km: String,
}

impl From<BusWithRoute> for BusWithRouteResponse {
    fn from(row: BusWithRoute) -> Self {
        Self {
            bus_id: row.bus_id.to_string(),
            registration_number: row.registration_number,
            seat_count: row.seat_count,
            service: row.service,
            route_name: row.route_name,
            start_point: row.start_point,
            end_point: row.end_point,
            price: row.price.to_string(),
            distance_km: row.distance_km.to_string(),
        }
    }
}
