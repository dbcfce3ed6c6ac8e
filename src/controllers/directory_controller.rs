//! Controller del directorio de rutas y buses
//!
//! Operaciones de solo lectura: puntos de partida y llegada distintos, y
//! buses de una ruta. Un par (origen, destino) sin coincidencias devuelve
//! una secuencia vacía, no un error.

use sqlx::PgPool;
use validator::Validate;

use crate::dto::directory_dto::{BusWithRouteResponse, RouteBusesQuery};
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::AppError;

pub struct DirectoryController {
    repository: RouteRepository,
}

impl DirectoryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RouteRepository::new(pool),
        }
    }

    pub async fn start_points(&self) -> Result<Vec<String>, AppError> {
        self.repository.distinct_start_points().await
    }

    pub async fn end_points(&self) -> Result<Vec<String>, AppError> {
        self.repository.distinct_end_points().await
    }

    pub async fn buses_by_route(
        &self,
        query: RouteBusesQuery,
    ) -> Result<Vec<BusWithRouteResponse>, AppError> {
        query.validate()?;

        let buses = self
            .repository
            .buses_by_points(&query.start, &query.end)
            .await?;

        Ok(buses.into_iter().map(BusWithRouteResponse::from).collect())
    }
}
