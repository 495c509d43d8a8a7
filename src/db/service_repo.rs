// src/db/service_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::service::{Service, ServiceCategory},
};

#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(services)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(service)
    }

    pub async fn create(
        &self,
        name: &str,
        amount: Decimal,
        category: ServiceCategory,
    ) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (name, amount, category) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(amount)
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "O serviço '{}' já existe.",
                        name
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        amount: Option<Decimal>,
        category: Option<ServiceCategory>,
    ) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services SET
                name = COALESCE($2, name),
                amount = COALESCE($3, amount),
                category = COALESCE($4, category),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(amount)
        .bind(category)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe um serviço com este nome.".to_string(),
                    );
                }
            }
            AppError::from(e)
        })?;

        Ok(service)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
