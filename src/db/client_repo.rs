// src/db/client_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::client::{Client, UpdateClientPayload},
};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Listagem com filtro de status, busca livre e paginação
    pub async fn list(
        &self,
        status: Option<bool>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Client>, i64), AppError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM clients WHERE 1=1");
        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM clients WHERE 1=1");

        for builder in [&mut query, &mut count_query] {
            if let Some(status) = status {
                builder.push(" AND status = ").push_bind(status);
            }
            if let Some(search) = search {
                let term = format!("%{}%", search);
                builder
                    .push(" AND (name ILIKE ")
                    .push_bind(term.clone())
                    .push(" OR email ILIKE ")
                    .push_bind(term.clone())
                    .push(" OR mobile ILIKE ")
                    .push_bind(term)
                    .push(")");
            }
        }

        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let clients = query
            .build_query_as::<Client>()
            .fetch_all(&self.pool)
            .await?;
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((clients, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: &str,
        mobile: Option<&str>,
        address: Option<&str>,
        company: Option<&str>,
        notes: Option<&str>,
        created_by: Option<Uuid>,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, email, mobile, address, company, notes, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(mobile)
        .bind(address)
        .bind(company)
        .bind(notes)
        .bind(created_by)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }

    // Atualização rasa: campo ausente no payload mantém o valor atual
    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateClientPayload,
    ) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                mobile = COALESCE($4, mobile),
                address = COALESCE($5, address),
                company = COALESCE($6, company),
                notes = COALESCE($7, notes),
                status = COALESCE($8, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.mobile.as_deref())
        .bind(payload.address.as_deref())
        .bind(payload.company.as_deref())
        .bind(payload.notes.as_deref())
        .bind(payload.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::from(e)
        })?;

        Ok(client)
    }

    // Soft delete: apenas vira o status para inativo
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE clients SET status = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn hard_delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Registra o vínculo cliente -> processo na criação de um processo
    pub async fn append_case<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        case_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE clients SET case_ids = array_append(case_ids, $2), updated_at = NOW() WHERE id = $1",
        )
        .bind(client_id)
        .bind(case_id)
        .execute(executor)
        .await?;

        Ok(())
    }
}
