//! Repositorio de rutas
//!
//! Directorio read-mostly: puntos de partida y llegada, resolución de ruta
//! por par exacto (start_point, end_point) y buses de una ruta.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::bus_dto::{CreateRouteRequest, UpdateRouteRequest};
use crate::models::route::Route;
use crate::utils::errors::AppError;

/// Bus con los datos de su ruta, para el listado del directorio
#[derive(Debug, sqlx::FromRow)]
pub struct BusWithRoute {
    pub bus_id: Uuid,
    pub registration_number: String,
    pub seat_count: i32,
    pub service: String,
    pub route_name: String,
    pub start_point: String,
    pub end_point: String,
    pub price: Decimal,
    pub distance_km: Decimal,
}

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn distinct_start_points(&self) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT start_point FROM routes ORDER BY start_point ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(point,)| point).collect())
    }

    pub async fn distinct_end_points(&self) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT end_point FROM routes ORDER BY end_point ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(point,)| point).collect())
    }

    /// Resolución por par exacto; None cuando la ruta no existe
    pub async fn find_by_points(
        &self,
        start_point: &str,
        end_point: &str,
    ) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>(
            "SELECT * FROM routes WHERE start_point = $1 AND end_point = $2",
        )
        .bind(start_point)
        .bind(end_point)
        .fetch_optional(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn find_by_id(&self, route_id: Uuid) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE route_id = $1")
            .bind(route_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    pub async fn list_all(&self) -> Result<Vec<Route>, AppError> {
        let routes =
            sqlx::query_as::<_, Route>("SELECT * FROM routes ORDER BY start_point, end_point")
                .fetch_all(&self.pool)
                .await?;

        Ok(routes)
    }

    /// Buses activos de la ruta identificada por (start, end), con la ruta
    /// denormalizada en la misma consulta
    pub async fn buses_by_points(
        &self,
        start_point: &str,
        end_point: &str,
    ) -> Result<Vec<BusWithRoute>, AppError> {
        let rows = sqlx::query_as::<_, BusWithRoute>(
            r#"
            SELECT b.bus_id, b.registration_number, b.seat_count, b.service,
                   r.name AS route_name, r.start_point, r.end_point, r.price, r.distance_km
            FROM buses b
            JOIN routes r ON r.route_id = b.route_id
            WHERE r.start_point = $1 AND r.end_point = $2 AND b.is_active = TRUE
            ORDER BY r.price ASC, b.bus_id ASC
            "#,
        )
        .bind(start_point)
        .bind(end_point)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, request: CreateRouteRequest) -> Result<Route, AppError> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (route_id, name, start_point, end_point, price, distance_km, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name)
        .bind(request.start_point)
        .bind(request.end_point)
        .bind(request.price)
        .bind(request.distance_km)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "A route between those points already exists"))?;

        Ok(route)
    }

    /// Update administrativo: solo los campos de la allow-list
    pub async fn update(
        &self,
        route_id: Uuid,
        request: UpdateRouteRequest,
    ) -> Result<Route, AppError> {
        let current = self
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        let route = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET name = $2, price = $3, distance_km = $4
            WHERE route_id = $1
            RETURNING *
            "#,
        )
        .bind(route_id)
        .bind(request.name.unwrap_or(current.name))
        .bind(request.price.unwrap_or(current.price))
        .bind(request.distance_km.unwrap_or(current.distance_km))
        .fetch_one(&self.pool)
        .await?;

        Ok(route)
    }
}

fn map_unique_violation(e: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.code().as_deref() == Some("23505") {
            return AppError::Conflict(message.to_string());
        }
    }
    AppError::Database(e)
}
