//! DTOs de asignaciones conductor-bus

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::conductor::ConductorAssignment;

/// Request para asignar un conductor a un bus
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignConductorRequest {
    pub conductor_id: Uuid,
    pub bus_id: Uuid,
}

/// Response de una asignación
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub id: String,
    pub conductor_id: String,
    pub bus_id: String,
    pub assigned_by: String,
    pub is_active: bool,
    pub assigned_at: String,
}

impl From<ConductorAssignment> for AssignmentResponse {
    fn from(assignment: ConductorAssignment) -> Self {
        Self {
            id: assignment.id.to_string(),
            conductor_id: assignment.conductor_id.to_string(),
            bus_id: assignment.bus_id.to_string(),
            assigned_by: assignment.assigned_by.to_string(),
            is_active: assignment.is_active,
            assigned_at: assignment.assigned_at.to_rfc3339(),
        }
    }
}
