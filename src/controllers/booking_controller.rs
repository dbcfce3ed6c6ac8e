//! Controller de reservas
//!
//! Orquesta la transacción de reserva y las transiciones de estado.
//! El adjuntado del QR corre después del commit, desacoplado: su falla se
//! loggea y nunca se refleja en la respuesta de la reserva.

use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::booking_dto::{
    BookingDetailResponse, BookingStatusResponse, BookingSummary, CreateBookingRequest,
    CreateBookingResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::booking::BookingStatus;
use crate::models::user::Role;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::bus_repository::BusRepository;
use crate::services::qr_service::QrService;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{validate_date, validate_travel_date};

const QR_ATTACH_ATTEMPTS: u32 = 3;

pub struct BookingController {
    repository: BookingRepository,
    buses: BusRepository,
    qr: Arc<QrService>,
    pool: PgPool,
}

impl BookingController {
    pub fn new(pool: PgPool, qr: Arc<QrService>) -> Self {
        Self {
            repository: BookingRepository::new(pool.clone()),
            buses: BusRepository::new(pool.clone()),
            qr,
            pool,
        }
    }

    /// Normalizar la lista de asientos pedidos: sin vacíos, sin números no
    /// positivos, deduplicada y en orden ascendente. El orden ascendente es
    /// el que recorre la transacción, para que dos requests con conjuntos
    /// solapados en distinto orden no se interbloqueen.
    pub fn normalize_seat_numbers(seats: &[i32]) -> Result<Vec<i32>, AppError> {
        if seats.is_empty() {
            return Err(AppError::BadRequest(
                "At least one seat number is required".to_string(),
            ));
        }

        if seats.iter().any(|&seat| seat <= 0) {
            return Err(AppError::BadRequest(
                "Seat numbers must be positive".to_string(),
            ));
        }

        let mut normalized = seats.to_vec();
        normalized.sort_unstable();
        normalized.dedup();

        Ok(normalized)
    }

    /// Crear una reserva multi-asiento. Todo-o-nada; los ids devueltos
    /// siguen el orden de número de asiento.
    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        request: CreateBookingRequest,
    ) -> Result<CreateBookingResponse, AppError> {
        request.validate()?;

        let travel_date = validate_travel_date(&request.travel_date).map_err(|_| {
            AppError::BadRequest(format!(
                "Invalid travel date '{}': expected YYYY-MM-DD, not in the past",
                request.travel_date
            ))
        })?;

        if request.price <= Decimal::ZERO {
            return Err(AppError::BadRequest("Price must be positive".to_string()));
        }

        let seat_numbers = Self::normalize_seat_numbers(&request.seat_numbers)?;

        let booking_ids = self
            .repository
            .create_bookings(
                caller.user_id,
                request.bus_id,
                travel_date,
                &seat_numbers,
                request.price,
            )
            .await?;

        // Post-commit: generar y adjuntar el QR de cada reserva en una task
        // aparte. La reserva ya es durable; acá solo se loggea el resultado.
        for &booking_id in &booking_ids {
            let qr = Arc::clone(&self.qr);
            let pool = self.pool.clone();
            let user_id = caller.user_id;

            tokio::spawn(async move {
                if let Err(e) = qr
                    .attach_with_retry(&pool, booking_id, user_id, QR_ATTACH_ATTEMPTS)
                    .await
                {
                    log::error!(
                        "❌ No se pudo adjuntar el QR a la reserva {}: {}",
                        booking_id,
                        e
                    );
                }
            });
        }

        Ok(CreateBookingResponse { booking_ids })
    }

    /// Asientos Active de un bus en una fecha, como lista ordenada
    pub async fn booked_seats(&self, bus_id: Uuid, date: &str) -> Result<Vec<i32>, AppError> {
        let travel_date = validate_date(date).map_err(|_| {
            AppError::BadRequest(format!("Invalid date '{}': expected YYYY-MM-DD", date))
        })?;

        self.buses
            .find_by_id(bus_id)
            .await?
            .ok_or_else(|| not_found_error("Bus", &bus_id.to_string()))?;

        self.repository.booked_seats(bus_id, travel_date).await
    }

    pub async fn my_bookings(&self, caller: &AuthenticatedUser) -> Result<Vec<BookingSummary>, AppError> {
        let bookings = self.repository.find_by_user(caller.user_id).await?;

        Ok(bookings.into_iter().map(BookingSummary::from).collect())
    }

    pub async fn detail(&self, booking_id: Uuid) -> Result<BookingDetailResponse, AppError> {
        let row = self
            .repository
            .detail(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &booking_id.to_string()))?;

        Ok(BookingDetailResponse::from(row))
    }

    /// Active -> Completed. Solo conductores y administradores; el update es
    /// condicional sobre el estado actual, así que una doble completación o
    /// una carrera con cancel termina en InvalidState, no en doble efecto.
    pub async fn complete(
        &self,
        booking_id: Uuid,
        caller: &AuthenticatedUser,
    ) -> Result<BookingStatusResponse, AppError> {
        if !caller.role.can_complete_bookings() {
            return Err(AppError::Forbidden(
                "Only conductors and administrators can complete bookings".to_string(),
            ));
        }

        let booking = self
            .repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &booking_id.to_string()))?;

        let affected = self.repository.complete(booking_id).await?;
        if affected == 0 {
            return Err(AppError::InvalidState(format!(
                "Booking cannot be completed from status '{}'",
                booking.status
            )));
        }

        Ok(BookingStatusResponse {
            booking_id,
            status: BookingStatus::Completed.as_str().to_string(),
        })
    }

    /// Cancelación: cambio de estado sobre una reserva existente. El asiento
    /// queda libre para nuevos chequeos de conflicto de inmediato.
    pub async fn cancel(
        &self,
        booking_id: Uuid,
        caller: &AuthenticatedUser,
    ) -> Result<BookingStatusResponse, AppError> {
        let booking = self
            .repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &booking_id.to_string()))?;

        if booking.user_id != caller.user_id && caller.role != Role::Admin {
            return Err(AppError::Forbidden(
                "Only the booking owner or an administrator can cancel it".to_string(),
            ));
        }

        self.repository.cancel(booking_id).await?;

        Ok(BookingStatusResponse {
            booking_id,
            status: BookingStatus::Cancelled.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sorts_and_dedupes() {
        let seats = BookingController::normalize_seat_numbers(&[7, 5, 6, 5]).unwrap();
        assert_eq!(seats, vec![5, 6, 7]);
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(BookingController::normalize_seat_numbers(&[]).is_err());
    }

    #[test]
    fn test_normalize_rejects_non_positive() {
        assert!(BookingController::normalize_seat_numbers(&[3, 0]).is_err());
        assert!(BookingController::normalize_seat_numbers(&[-1]).is_err());
    }

    #[test]
    fn test_normalize_keeps_single_seat() {
        let seats = BookingController::normalize_seat_numbers(&[12]).unwrap();
        assert_eq!(seats, vec![12]);
    }
}
