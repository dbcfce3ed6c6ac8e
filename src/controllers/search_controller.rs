//! Controller de búsqueda de disponibilidad
//!
//! Implementa la búsqueda de buses elegibles: resuelve la ruta por el par
//! exacto (origen, destino), calcula los asientos libres contra las reservas
//! Active y ordena por precio. "Ruta inexistente" y "ruta sin capacidad" son
//! resultados distinguibles para el cliente.

use sqlx::PgPool;
use validator::Validate;

use crate::dto::search_dto::{BusAvailability, SearchCriteria, SearchRequest, SearchResponse};
use crate::models::bus::ServiceClass;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_travel_date;

pub struct SearchController {
    routes: RouteRepository,
    bookings: BookingRepository,
}

impl SearchController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool),
        }
    }

    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse, AppError> {
        request.validate()?;

        let travel_date = validate_travel_date(&request.date).map_err(|_| {
            AppError::BadRequest(format!(
                "Invalid travel date '{}': expected YYYY-MM-DD, not in the past",
                request.date
            ))
        })?;

        // La clase de servicio se normaliza al vocabulario canónico antes
        // de tocar la consulta
        let service_class = match &request.service {
            Some(value) => Some(ServiceClass::parse(value).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown service class '{}'", value))
            })?),
            None => None,
        };

        // Ruta inexistente: NotFound, distinto de "sin capacidad"
        let route = self
            .routes
            .find_by_points(&request.from, &request.to)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No route found from '{}' to '{}'",
                    request.from, request.to
                ))
            })?;

        let rows = self
            .bookings
            .availability_by_route(
                route.route_id,
                travel_date,
                service_class.map(|s| s.as_str()),
                request.number_of_seats,
            )
            .await?;

        let search_criteria = SearchCriteria {
            from: request.from,
            to: request.to,
            date: request.date,
            number_of_seats: request.number_of_seats,
            service: service_class.map(|s| s.as_str().to_string()),
        };

        if rows.is_empty() {
            // La ruta existe pero ningún bus tiene asientos suficientes
            return Ok(SearchResponse {
                message: Some(format!(
                    "No buses with {} available seats on {}",
                    search_criteria.number_of_seats, search_criteria.date
                )),
                available_buses: vec![],
                search_criteria,
            });
        }

        Ok(SearchResponse {
            message: None,
            available_buses: rows.into_iter().map(BusAvailability::from).collect(),
            search_criteria,
        })
    }
}
