// src/db/case_repo.rs

use chrono::NaiveDate;
use sqlx::{types::Json, Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::case::{
        Case, CaseDocument, CaseNote, CaseStatus, CreateCasePayload, TimelineEntry,
        UpdateCasePayload,
    },
};

pub struct CaseFilters<'a> {
    pub status: Option<CaseStatus>,
    pub important: Option<bool>,
    pub archived: Option<bool>,
    pub search: Option<&'a str>,
    pub hearing_from: Option<NaiveDate>,
    pub hearing_to: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filters: &CaseFilters<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Case>, i64), AppError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM cases WHERE 1=1");
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM cases WHERE 1=1");

        for builder in [&mut query, &mut count_query] {
            if let Some(status) = filters.status {
                builder.push(" AND status = ").push_bind(status);
            }
            if let Some(important) = filters.important {
                builder.push(" AND is_important = ").push_bind(important);
            }
            // Sem o filtro explícito, os arquivados ficam de fora da listagem
            let archived = filters.archived.unwrap_or(false);
            builder.push(" AND archived = ").push_bind(archived);

            if let Some(search) = filters.search {
                let term = format!("%{}%", search);
                builder
                    .push(" AND (client_name ILIKE ")
                    .push_bind(term.clone())
                    .push(" OR client_no ILIKE ")
                    .push_bind(term.clone())
                    .push(" OR case_type ILIKE ")
                    .push_bind(term)
                    .push(")");
            }
            if let Some(from) = filters.hearing_from {
                builder.push(" AND next_hearing >= ").push_bind(from);
            }
            if let Some(to) = filters.hearing_to {
                builder.push(" AND next_hearing <= ").push_bind(to);
            }
        }

        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let cases = query.build_query_as::<Case>().fetch_all(&self.pool).await?;
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((cases, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>, AppError> {
        let case = sqlx::query_as::<_, Case>("SELECT * FROM cases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(case)
    }

    // Inserção única: a entrada inicial da timeline ("Case created") já
    // faz parte do payload do INSERT, sem segunda escrita.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        payload: &CreateCasePayload,
        seed_timeline: Vec<TimelineEntry>,
        created_by: Uuid,
        assigned_to: Uuid,
    ) -> Result<Case, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Case>(
            r#"
            INSERT INTO cases (
                client_name, client_no, client_id, case_type, court, court_no,
                magistrate, petitioner, respondent, next_hearing, status,
                is_important, assigned_to, created_by, timeline
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, 'Pending'), $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(payload.client_name.as_deref().map(str::trim))
        .bind(payload.client_no.as_deref().map(str::trim))
        .bind(payload.client_id)
        .bind(payload.case_type.as_deref().map(str::trim))
        .bind(payload.court.as_deref().map(str::trim))
        .bind(payload.court_no.as_deref())
        .bind(payload.magistrate.as_deref())
        .bind(payload.petitioner.as_deref().map(str::trim))
        .bind(payload.respondent.as_deref().map(str::trim))
        .bind(payload.next_hearing)
        .bind(payload.status)
        .bind(payload.is_important.unwrap_or(false))
        .bind(assigned_to)
        .bind(created_by)
        .bind(Json(seed_timeline))
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe um processo com este número de cliente.".to_string(),
                    );
                }
            }
            e.into()
        })
    }

    // Merge dos campos de topo; timeline e notes são ANEXADOS ao que já
    // existe (concatenação jsonb), nunca substituídos.
    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateCasePayload,
        new_timeline: Vec<TimelineEntry>,
        new_notes: Vec<CaseNote>,
    ) -> Result<Option<Case>, AppError> {
        let case = sqlx::query_as::<_, Case>(
            r#"
            UPDATE cases SET
                client_name = COALESCE($2, client_name),
                client_no = COALESCE($16, client_no),
                case_type = COALESCE($3, case_type),
                court = COALESCE($4, court),
                court_no = COALESCE($5, court_no),
                magistrate = COALESCE($6, magistrate),
                petitioner = COALESCE($7, petitioner),
                respondent = COALESCE($8, respondent),
                next_hearing = COALESCE($9, next_hearing),
                status = COALESCE($10, status),
                is_important = COALESCE($11, is_important),
                archived = COALESCE($12, archived),
                assigned_to = COALESCE($13, assigned_to),
                timeline = timeline || $14,
                notes = notes || $15,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.client_name.as_deref())
        .bind(payload.case_type.as_deref())
        .bind(payload.court.as_deref())
        .bind(payload.court_no.as_deref())
        .bind(payload.magistrate.as_deref())
        .bind(payload.petitioner.as_deref())
        .bind(payload.respondent.as_deref())
        .bind(payload.next_hearing)
        .bind(payload.status)
        .bind(payload.is_important)
        .bind(payload.archived)
        .bind(payload.assigned_to)
        .bind(Json(new_timeline))
        .bind(Json(new_notes))
        .bind(payload.client_no.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe um processo com este número de cliente.".to_string(),
                    );
                }
            }
            e.into()
        })?;

        Ok(case)
    }

    pub async fn append_document(
        &self,
        id: Uuid,
        document: CaseDocument,
    ) -> Result<Option<Case>, AppError> {
        let case = sqlx::query_as::<_, Case>(
            r#"
            UPDATE cases SET
                documents = documents || $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(vec![document]))
        .fetch_optional(&self.pool)
        .await?;

        Ok(case)
    }

    // Soft delete: arquiva o processo
    pub async fn archive(&self, id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE cases SET archived = TRUE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    // Checagem de integridade referencial do hard delete de cliente
    pub async fn count_by_client<'e, E>(&self, executor: E, client_id: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cases WHERE client_id = $1")
            .bind(client_id)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}
