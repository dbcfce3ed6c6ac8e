//! Controller de asignaciones conductor-bus
//!
//! A lo sumo una asignación activa por par (conductor, bus): un intento de
//! duplicarla falla con Conflict.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::conductor_dto::{AssignConductorRequest, AssignmentResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::Role;
use crate::repositories::bus_repository::BusRepository;
use crate::repositories::conductor_repository::ConductorRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct ConductorController {
    repository: ConductorRepository,
    users: UserRepository,
    buses: BusRepository,
}

impl ConductorController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ConductorRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            buses: BusRepository::new(pool),
        }
    }

    fn require_admin(caller: &AuthenticatedUser) -> Result<(), AppError> {
        if caller.role != Role::Admin {
            return Err(AppError::Forbidden(
                "Only administrators can manage conductor assignments".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn assign(
        &self,
        caller: &AuthenticatedUser,
        request: AssignConductorRequest,
    ) -> Result<ApiResponse<AssignmentResponse>, AppError> {
        Self::require_admin(caller)?;

        let conductor = self
            .users
            .find_by_id(request.conductor_id)
            .await?
            .ok_or_else(|| not_found_error("User", &request.conductor_id.to_string()))?;

        if conductor.role() != Some(Role::Conductor) {
            return Err(AppError::BadRequest(
                "The assigned user must have the Conductor role".to_string(),
            ));
        }

        self.buses
            .find_by_id(request.bus_id)
            .await?
            .ok_or_else(|| not_found_error("Bus", &request.bus_id.to_string()))?;

        if self
            .repository
            .active_exists(request.conductor_id, request.bus_id)
            .await?
        {
            return Err(AppError::Conflict(
                "An active assignment already exists for that conductor and bus".to_string(),
            ));
        }

        let assignment = self
            .repository
            .create(request.conductor_id, request.bus_id, caller.user_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            AssignmentResponse::from(assignment),
            "Conductor assigned successfully".to_string(),
        ))
    }

    pub async fn deactivate(
        &self,
        caller: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<()>, AppError> {
        Self::require_admin(caller)?;

        let affected = self.repository.deactivate(id).await?;
        if affected == 0 {
            return Err(not_found_error("Assignment", &id.to_string()));
        }

        Ok(ApiResponse::success_with_message(
            (),
            "Assignment deactivated successfully".to_string(),
        ))
    }

    pub async fn list_by_bus(&self, bus_id: Uuid) -> Result<Vec<AssignmentResponse>, AppError> {
        let assignments = self.repository.find_active_by_bus(bus_id).await?;

        Ok(assignments.into_iter().map(AssignmentResponse::from).collect())
    }

    pub async fn list_by_conductor(
        &self,
        conductor_id: Uuid,
    ) -> Result<Vec<AssignmentResponse>, AppError> {
        let assignments = self.repository.find_active_by_conductor(conductor_id).await?;

        Ok(assignments.into_iter().map(AssignmentResponse::from).collect())
    }
}
