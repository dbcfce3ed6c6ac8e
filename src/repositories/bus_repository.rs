//! Repositorio de buses

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::bus_dto::{CreateBusRequest, UpdateBusRequest};
use crate::models::bus::Bus;
use crate::utils::errors::AppError;

pub struct BusRepository {
    pool: PgPool,
}

impl BusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateBusRequest, service: &str) -> Result<Bus, AppError> {
        let bus = sqlx::query_as::<_, Bus>(
            r#"
            INSERT INTO buses
                (bus_id, registration_number, route_id, owner_id, seat_count, service, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.registration_number)
        .bind(request.route_id)
        .bind(request.owner_id)
        .bind(request.seat_count)
        .bind(service)
        .fetch_one(&self.pool)
        .await
        .map_err(map_registration_conflict)?;

        Ok(bus)
    }

    pub async fn find_by_id(&self, bus_id: Uuid) -> Result<Option<Bus>, AppError> {
        let bus = sqlx::query_as::<_, Bus>("SELECT * FROM buses WHERE bus_id = $1")
            .bind(bus_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(bus)
    }

    pub async fn find_by_route(&self, route_id: Uuid) -> Result<Vec<Bus>, AppError> {
        let buses = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses WHERE route_id = $1 AND is_active = TRUE ORDER BY registration_number",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(buses)
    }

    pub async fn list_active(&self) -> Result<Vec<Bus>, AppError> {
        let buses = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses WHERE is_active = TRUE ORDER BY registration_number",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(buses)
    }

    /// Update con allow-list explícita de columnas
    pub async fn update(
        &self,
        bus_id: Uuid,
        request: UpdateBusRequest,
        service: Option<&str>,
    ) -> Result<Bus, AppError> {
        let current = self
            .find_by_id(bus_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bus not found".to_string()))?;

        let bus = sqlx::query_as::<_, Bus>(
            r#"
            UPDATE buses
            SET registration_number = $2, route_id = $3, seat_count = $4, service = $5
            WHERE bus_id = $1
            RETURNING *
            "#,
        )
        .bind(bus_id)
        .bind(request.registration_number.unwrap_or(current.registration_number))
        .bind(request.route_id.unwrap_or(current.route_id))
        .bind(request.seat_count.unwrap_or(current.seat_count))
        .bind(service.map(|s| s.to_string()).unwrap_or(current.service))
        .fetch_one(&self.pool)
        .await
        .map_err(map_registration_conflict)?;

        Ok(bus)
    }

    /// Soft delete: el bus deja de aparecer en búsquedas y reservas nuevas
    pub async fn deactivate(&self, bus_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE buses SET is_active = FALSE WHERE bus_id = $1")
            .bind(bus_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_registration_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.code().as_deref() == Some("23505") {
            return AppError::Conflict(
                "A bus with that registration number already exists".to_string(),
            );
        }
    }
    AppError::Database(e)
}
