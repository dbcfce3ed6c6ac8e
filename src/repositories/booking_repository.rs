//! Repositorio de reservas
//!
//! Contiene la consulta de disponibilidad y la transacción de reserva
//! multi-asiento. El invariante central del sistema vive acá: para un
//! (bus_id, travel_date) fijo, el conjunto de seat_number de las reservas
//! Active no admite duplicados, incluso bajo requests concurrentes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::Booking;
use crate::utils::errors::{seat_conflict_error, AppError};

/// Fila de disponibilidad: un bus elegible con su ruta y los asientos libres
/// calculados en la misma consulta.
#[derive(Debug, sqlx::FromRow)]
pub struct AvailabilityRow {
    pub bus_id: Uuid,
    pub registration_number: String,
    pub service: String,
    pub seat_count: i32,
    pub available_seats: i32,
    pub route_id: Uuid,
    pub route_name: String,
    pub start_point: String,
    pub end_point: String,
    pub price: Decimal,
    pub distance_km: Decimal,
}

/// Fila de detalle de reserva con pasajero, bus y ruta denormalizados
#[derive(Debug, sqlx::FromRow)]
pub struct BookingDetailRow {
    pub booking_id: Uuid,
    pub seat_number: i32,
    pub travel_date: NaiveDate,
    pub price: Decimal,
    pub status: String,
    pub qr_code: Option<String>,
    pub booking_date: chrono::DateTime<chrono::Utc>,
    pub passenger_name: String,
    pub passenger_email: String,
    pub passenger_phone: Option<String>,
    pub bus_id: Uuid,
    pub registration_number: String,
    pub service: String,
    pub route_name: String,
    pub start_point: String,
    pub end_point: String,
}

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Disponibilidad de todos los buses activos de una ruta en una fecha,
    /// en un único snapshot consistente: el conteo de reservas Active se
    /// resuelve con un subquery agrupado por bus dentro de la misma consulta.
    /// Lectura pura, sin locks.
    pub async fn availability_by_route(
        &self,
        route_id: Uuid,
        travel_date: NaiveDate,
        service: Option<&str>,
        requested_seats: i32,
    ) -> Result<Vec<AvailabilityRow>, AppError> {
        let rows = sqlx::query_as::<_, AvailabilityRow>(
            r#"
            SELECT b.bus_id, b.registration_number, b.service, b.seat_count,
                   (b.seat_count - COALESCE(active.booked, 0))::INT AS available_seats,
                   r.route_id, r.name AS route_name, r.start_point, r.end_point,
                   r.price, r.distance_km
            FROM buses b
            JOIN routes r ON r.route_id = b.route_id
            LEFT JOIN (
                SELECT bus_id, COUNT(*) AS booked
                FROM bookings
                WHERE travel_date = $2 AND status = 'Active'
                GROUP BY bus_id
            ) active ON active.bus_id = b.bus_id
            WHERE b.route_id = $1
              AND b.is_active = TRUE
              AND ($3::TEXT IS NULL OR b.service = $3)
              AND b.seat_count - COALESCE(active.booked, 0) >= $4
            ORDER BY r.price ASC, b.bus_id ASC
            "#,
        )
        .bind(route_id)
        .bind(travel_date)
        .bind(service)
        .bind(requested_seats)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Asientos Active de un bus en una fecha, en orden ascendente
    pub async fn booked_seats(
        &self,
        bus_id: Uuid,
        travel_date: NaiveDate,
    ) -> Result<Vec<i32>, AppError> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            r#"
            SELECT seat_number
            FROM bookings
            WHERE bus_id = $1 AND travel_date = $2 AND status = 'Active'
            ORDER BY seat_number ASC
            "#,
        )
        .bind(bus_id)
        .bind(travel_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(seat,)| seat).collect())
    }

    /// Transacción de reserva multi-asiento. Todo-o-nada: o se reservan
    /// todos los asientos pedidos o ninguno.
    ///
    /// Protocolo:
    /// 1. Abrir transacción con lock_timeout acotado.
    /// 2. Lock de la fila del bus (SELECT ... FOR UPDATE): serializa los
    ///    intentos de reserva concurrentes sobre el mismo bus, de modo que
    ///    dos transacciones no puedan pasar el chequeo de conflicto para el
    ///    mismo asiento.
    /// 3. Chequeo de conflicto por asiento, en orden ascendente. El primer
    ///    asiento ocupado aborta la transacción completa con Conflict.
    /// 4. Insert de una fila por asiento con status Active, mismo orden.
    /// 5. Commit. El índice único parcial sobre asientos Active convierte
    ///    cualquier carrera residual en unique violation, mapeada a Conflict.
    ///
    /// `seat_numbers` debe venir deduplicado y ordenado ascendente.
    pub async fn create_bookings(
        &self,
        user_id: Uuid,
        bus_id: Uuid,
        travel_date: NaiveDate,
        seat_numbers: &[i32],
        price: Decimal,
    ) -> Result<Vec<Uuid>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Una espera de lock que supere la cota se reporta como conflicto
        // reintentable, nunca como un commit a medias.
        sqlx::query("SET LOCAL lock_timeout = '5s'")
            .execute(&mut *tx)
            .await?;

        let bus: Option<(i32,)> = sqlx::query_as(
            "SELECT seat_count FROM buses WHERE bus_id = $1 AND is_active = TRUE FOR UPDATE",
        )
        .bind(bus_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_locking_error)?;

        let (seat_count,) = bus.ok_or_else(|| {
            AppError::NotFound(format!("Bus with id '{}' not found or inactive", bus_id))
        })?;

        for &seat in seat_numbers {
            if seat > seat_count {
                return Err(AppError::BadRequest(format!(
                    "Seat {} exceeds the bus capacity of {}",
                    seat, seat_count
                )));
            }

            let taken: Option<(Uuid,)> = sqlx::query_as(
                r#"
                SELECT booking_id
                FROM bookings
                WHERE bus_id = $1 AND travel_date = $2 AND seat_number = $3
                  AND status = 'Active'
                LIMIT 1
                "#,
            )
            .bind(bus_id)
            .bind(travel_date)
            .bind(seat)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_locking_error)?;

            if taken.is_some() {
                // Soltar la transacción revierte los locks; nada se insertó aún
                return Err(seat_conflict_error(seat));
            }
        }

        let mut booking_ids = Vec::with_capacity(seat_numbers.len());
        for &seat in seat_numbers {
            let (booking_id,): (Uuid,) = sqlx::query_as(
                r#"
                INSERT INTO bookings
                    (booking_id, user_id, bus_id, seat_number, travel_date, price, status, booking_date)
                VALUES ($1, $2, $3, $4, $5, $6, 'Active', NOW())
                RETURNING booking_id
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(bus_id)
            .bind(seat)
            .bind(travel_date)
            .bind(price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_insert_error(e, seat))?;

            booking_ids.push(booking_id);
        }

        tx.commit().await?;

        Ok(booking_ids)
    }

    pub async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY booking_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Detalle de reserva con pasajero, bus y ruta en una sola consulta
    pub async fn detail(&self, booking_id: Uuid) -> Result<Option<BookingDetailRow>, AppError> {
        let row = sqlx::query_as::<_, BookingDetailRow>(
            r#"
            SELECT bk.booking_id, bk.seat_number, bk.travel_date, bk.price, bk.status,
                   bk.qr_code, bk.booking_date,
                   u.name AS passenger_name, u.email AS passenger_email,
                   u.phone_no AS passenger_phone,
                   b.bus_id, b.registration_number, b.service,
                   r.name AS route_name, r.start_point, r.end_point
            FROM bookings bk
            JOIN users u ON u.user_id = bk.user_id
            JOIN buses b ON b.bus_id = bk.bus_id
            JOIN routes r ON r.route_id = b.route_id
            WHERE bk.booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Update condicional Active -> Completed. Devuelve la cantidad de filas
    /// afectadas: 0 significa que la reserva no estaba en Active.
    pub async fn complete(&self, booking_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'Completed' WHERE booking_id = $1 AND status = 'Active'",
        )
        .bind(booking_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Cancelación: cambio de estado, nunca borrado físico. El asiento queda
    /// disponible de inmediato porque el chequeo de conflicto filtra por
    /// status Active.
    pub async fn cancel(&self, booking_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE bookings SET status = 'Cancelled' WHERE booking_id = $1")
            .bind(booking_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Escribir la URL del artefacto QR. Única mutación permitida fuera de
    /// las transiciones de estado.
    pub async fn set_qr_code(&self, booking_id: Uuid, url: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE bookings SET qr_code = $2 WHERE booking_id = $1")
            .bind(booking_id)
            .bind(url)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Timeout de lock (SQLSTATE 55P03) se reporta como conflicto reintentable
fn map_locking_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.code().as_deref() == Some("55P03") {
            return AppError::Conflict(
                "Could not reserve the requested seats in time, please retry".to_string(),
            );
        }
    }
    AppError::Database(e)
}

/// Unique violation del índice parcial de asientos Active -> Conflict
fn map_insert_error(e: sqlx::Error, seat: i32) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        match db.code().as_deref() {
            Some("23505") => return seat_conflict_error(seat),
            Some("55P03") => {
                return AppError::Conflict(
                    "Could not reserve the requested seats in time, please retry".to_string(),
                )
            }
            _ => {}
        }
    }
    AppError::Database(e)
}
