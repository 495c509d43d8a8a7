// src/db/appointment_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::appointment::{
        Appointment, AppointmentStatus, CreateAppointmentPayload, UpdateAppointmentPayload,
    },
};

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Lista global (não escopada por dono), ordenada por data e hora
    pub async fn list(&self) -> Result<Vec<Appointment>, AppError> {
        let appointments = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments ORDER BY date ASC, time ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, AppError> {
        let appointment =
            sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(appointment)
    }

    pub async fn create(
        &self,
        payload: &CreateAppointmentPayload,
        created_by: Uuid,
    ) -> Result<Appointment, AppError> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (
                title, client_id, date, time, duration_minutes,
                location, description, status, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'Scheduled'), $9)
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(payload.client_id)
        .bind(payload.date)
        .bind(payload.time)
        .bind(payload.duration_minutes.unwrap_or(60))
        .bind(payload.location.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.status)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(appointment)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateAppointmentPayload,
    ) -> Result<Option<Appointment>, AppError> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments SET
                title = COALESCE($2, title),
                client_id = COALESCE($3, client_id),
                date = COALESCE($4, date),
                time = COALESCE($5, time),
                duration_minutes = COALESCE($6, duration_minutes),
                location = COALESCE($7, location),
                description = COALESCE($8, description),
                status = COALESCE($9, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.title.as_deref())
        .bind(payload.client_id)
        .bind(payload.date)
        .bind(payload.time)
        .bind(payload.duration_minutes)
        .bind(payload.location.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, AppError> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_client<'e, E>(&self, executor: E, client_id: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM appointments WHERE client_id = $1")
                .bind(client_id)
                .fetch_one(executor)
                .await?;

        Ok(count)
    }
}
