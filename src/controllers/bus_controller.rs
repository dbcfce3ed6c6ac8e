//! Controller de administración de buses

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::bus_dto::{BusResponse, CreateBusRequest, UpdateBusRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::bus::ServiceClass;
use crate::models::user::Role;
use crate::repositories::bus_repository::BusRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct BusController {
    repository: BusRepository,
    routes: RouteRepository,
}

impl BusController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BusRepository::new(pool.clone()),
            routes: RouteRepository::new(pool),
        }
    }

    fn require_admin(caller: &AuthenticatedUser) -> Result<(), AppError> {
        if caller.role != Role::Admin {
            return Err(AppError::Forbidden(
                "Only administrators can manage buses".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        request: CreateBusRequest,
    ) -> Result<ApiResponse<BusResponse>, AppError> {
        Self::require_admin(caller)?;
        request.validate()?;

        let service = ServiceClass::parse(&request.service).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown service class '{}'", request.service))
        })?;

        // El bus debe colgar de una ruta existente
        self.routes
            .find_by_id(request.route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &request.route_id.to_string()))?;

        let bus = self.repository.create(request, service.as_str()).await?;

        Ok(ApiResponse::success_with_message(
            BusResponse::from(bus),
            "Bus registered successfully".to_string(),
        ))
    }

    pub async fn get(&self, bus_id: Uuid) -> Result<BusResponse, AppError> {
        let bus = self
            .repository
            .find_by_id(bus_id)
            .await?
            .ok_or_else(|| not_found_error("Bus", &bus_id.to_string()))?;

        Ok(BusResponse::from(bus))
    }

    pub async fn list_by_route(&self, route_id: Uuid) -> Result<Vec<BusResponse>, AppError> {
        let buses = self.repository.find_by_route(route_id).await?;

        Ok(buses.into_iter().map(BusResponse::from).collect())
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        bus_id: Uuid,
        request: UpdateBusRequest,
    ) -> Result<BusResponse, AppError> {
        Self::require_admin(caller)?;
        request.validate()?;

        let service = match &request.service {
            Some(value) => Some(ServiceClass::parse(value).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown service class '{}'", value))
            })?),
            None => None,
        };

        if let Some(route_id) = request.route_id {
            self.routes
                .find_by_id(route_id)
                .await?
                .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;
        }

        let bus = self
            .repository
            .update(bus_id, request, service.map(|s| s.as_str()))
            .await?;

        Ok(BusResponse::from(bus))
    }

    /// Soft delete; las reservas existentes del bus no se tocan
    pub async fn deactivate(
        &self,
        caller: &AuthenticatedUser,
        bus_id: Uuid,
    ) -> Result<ApiResponse<()>, AppError> {
        Self::require_admin(caller)?;

        let affected = self.repository.deactivate(bus_id).await?;
        if affected == 0 {
            return Err(not_found_error("Bus", &bus_id.to_string()));
        }

        Ok(ApiResponse::success_with_message(
            (),
            "Bus deactivated successfully".to_string(),
        ))
    }
}
