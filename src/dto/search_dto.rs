//! DTOs de búsqueda de disponibilidad

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::repositories::booking_repository::AvailabilityRow;

/// Request de búsqueda: origen, destino, fecha, cantidad de asientos y
/// clase de servicio opcional
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[validate(length(min = 1, max = 255))]
    pub from: String,

    #[validate(length(min = 1, max = 255))]
    pub to: String,

    /// Fecha de viaje en formato YYYY-MM-DD
    pub date: String,

    #[validate(range(min = 1, max = 100))]
    pub number_of_seats: i32,

    pub service: Option<String>,
}

/// Un bus elegible con su disponibilidad calculada
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusAvailability {
    pub bus_id: String,
    pub registration_number: String,
    pub service: String,
    pub seat_count: i32,
    pub available_seats: i32,
    pub route_name: String,
    pub start_point: String,
    pub end_point: String,
    pub price: String,
    pub distance_km: String,
}

impl From<AvailabilityRow> for BusAvailability {
    fn from(row: AvailabilityRow) -> Self {
        Self {
            bus_id: row.bus_id.to_string(),
            registration_number: row.registration_number,
            service: row.service,
            seat_count: row.seat_count,
            available_seats: row.available_seats,
            route_name: row.route_name,
            start_point: row.start_point,
            end_point: row.end_point,
            price: row.price.to_string(),
            distance_km: row.distance_km.to_string(),
        }
    }
}

/// Criterios con los que se ejecutó la búsqueda, devueltos al cliente
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub from: String,
    pub to: String,
    pub date: String,
    pub number_of_seats: i32,
    pub service: Option<String>,
}

/// Response de búsqueda. `message` solo aparece cuando la ruta existe
/// pero ningún bus tiene capacidad suficiente.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub available_buses: Vec<BusAvailability>,
    pub search_criteria: SearchCriteria,
}
