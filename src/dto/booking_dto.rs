//! DTOs de reservas

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::Booking;
use crate::repositories::booking_repository::BookingDetailRow;

/// Request para crear una reserva multi-asiento
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub bus_id: Uuid,

    #[validate(length(min = 1, max = 10))]
    pub seat_numbers: Vec<i32>,

    /// Fecha de viaje en formato YYYY-MM-DD
    pub travel_date: String,

    pub price: Decimal,
}

/// Response de creación: ids en orden de número de asiento
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub booking_ids: Vec<Uuid>,
}

/// Response de una transición de estado
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusResponse {
    pub booking_id: Uuid,
    pub status: String,
}

/// Resumen de reserva para listados del pasajero
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub booking_id: String,
    pub bus_id: String,
    pub seat_number: i32,
    pub travel_date: String,
    pub price: String,
    pub status: String,
    pub qr_code: Option<String>,
    pub booking_date: String,
}

impl From<Booking> for BookingSummary {
    fn from(booking: Booking) -> Self {
        Self {
            booking_id: booking.booking_id.to_string(),
            bus_id: booking.bus_id.to_string(),
            seat_number: booking.seat_number,
            travel_date: booking.travel_date.to_string(),
            price: booking.price.to_string(),
            status: booking.status,
            qr_code: booking.qr_code,
            booking_date: booking.booking_date.to_rfc3339(),
        }
    }
}

/// Detalle de reserva con datos denormalizados de pasajero, bus y ruta
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetailResponse {
    pub booking_id: String,
    pub seat_number: i32,
    pub travel_date: String,
    pub price: String,
    pub status: String,
    pub qr_code: Option<String>,
    pub booking_date: String,
    pub passenger_name: String,
    pub passenger_email: String,
    pub passenger_phone: Option<String>,
    pub bus_id: String,
    pub registration_number: String,
    pub service: String,
    pub route_name: String,
    pub start_point: String,
    pub end_point: String,
}

impl From<BookingDetailRow> for BookingDetailResponse {
    fn from(row: BookingDetailRow) -> Self {
        Self {
            booking_id: row.booking_id.to_string(),
            seat_number: row.seat_number,
            travel_date: row.travel_date.to_string(),
            price: row.price.to_string(),
            status: row.status,
            qr_code: row.qr_code,
            booking_date: row.booking_date.to_rfc3339(),
            passenger_name: row.passenger_name,
            passenger_email: row.passenger_email,
            passenger_phone: row.passenger_phone,
            bus_id: row.bus_id.to_string(),
            registration_number: row.registration_number,
            service: row.service,
            route_name: row.route_name,
            start_point: row.start_point,
            end_point: row.end_point,
        }
    }
}
