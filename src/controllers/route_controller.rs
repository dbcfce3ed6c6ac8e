//! Controller de administración de rutas

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::bus_dto::{CreateRouteRequest, RouteResponse, UpdateRouteRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::Role;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct RouteController {
    repository: RouteRepository,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RouteRepository::new(pool),
        }
    }

    fn require_admin(caller: &AuthenticatedUser) -> Result<(), AppError> {
        if caller.role != Role::Admin {
            return Err(AppError::Forbidden(
                "Only administrators can manage routes".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        request: CreateRouteRequest,
    ) -> Result<ApiResponse<RouteResponse>, AppError> {
        Self::require_admin(caller)?;
        request.validate()?;

        let route = self.repository.create(request).await?;

        Ok(ApiResponse::success_with_message(
            RouteResponse::from(route),
            "Route created successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        route_id: Uuid,
        request: UpdateRouteRequest,
    ) -> Result<RouteResponse, AppError> {
        Self::require_admin(caller)?;
        request.validate()?;

        let route = self.repository.update(route_id, request).await?;

        Ok(RouteResponse::from(route))
    }

    pub async fn list(&self) -> Result<Vec<RouteResponse>, AppError> {
        let routes = self.repository.list_all().await?;

        Ok(routes.into_iter().map(RouteResponse::from).collect())
    }

    pub async fn get(&self, route_id: Uuid) -> Result<RouteResponse, AppError> {
        let route = self
            .repository
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        Ok(RouteResponse::from(route))
    }
}
