//! Repositorio de asignaciones conductor-bus

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::conductor::ConductorAssignment;
use crate::utils::errors::AppError;

pub struct ConductorRepository {
    pool: PgPool,
}

impl ConductorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Existe una asignación activa para el par (conductor, bus)?
    pub async fn active_exists(&self, conductor_id: Uuid, bus_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM conductor_bus
                WHERE conductor_id = $1 AND bus_id = $2 AND is_active = TRUE
            )
            "#,
        )
        .bind(conductor_id)
        .bind(bus_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn create(
        &self,
        conductor_id: Uuid,
        bus_id: Uuid,
        assigned_by: Uuid,
    ) -> Result<ConductorAssignment, AppError> {
        let assignment = sqlx::query_as::<_, ConductorAssignment>(
            r#"
            INSERT INTO conductor_bus (id, conductor_id, bus_id, assigned_by, is_active, assigned_at)
            VALUES ($1, $2, $3, $4, TRUE, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(conductor_id)
        .bind(bus_id)
        .bind(assigned_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(assignment)
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE conductor_bus SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_active_by_bus(
        &self,
        bus_id: Uuid,
    ) -> Result<Vec<ConductorAssignment>, AppError> {
        let assignments = sqlx::query_as::<_, ConductorAssignment>(
            "SELECT * FROM conductor_bus WHERE bus_id = $1 AND is_active = TRUE ORDER BY assigned_at DESC",
        )
        .bind(bus_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    pub async fn find_active_by_conductor(
        &self,
        conductor_id: Uuid,
    ) -> Result<Vec<ConductorAssignment>, AppError> {
        let assignments = sqlx::query_as::<_, ConductorAssignment>(
            "SELECT * FROM conductor_bus WHERE conductor_id = $1 AND is_active = TRUE ORDER BY assigned_at DESC",
        )
        .bind(conductor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }
}
