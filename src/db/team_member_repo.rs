// src/db/team_member_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::team_member::{MemberStatus, TeamMember, TeamRole},
};

pub struct TeamMemberInsert<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub position: &'a str,
    pub role: TeamRole,
    pub phone: Option<&'a str>,
    pub join_date: Option<NaiveDate>,
    pub profile_image: Option<&'a str>,
    pub status: MemberStatus,
    pub specializations: &'a [String],
}

pub struct TeamMemberUpdate<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub position: Option<&'a str>,
    pub role: Option<TeamRole>,
    pub phone: Option<&'a str>,
    pub join_date: Option<NaiveDate>,
    pub profile_image: Option<&'a str>,
    pub status: Option<MemberStatus>,
    pub specializations: Option<&'a [String]>,
}

#[derive(Clone)]
pub struct TeamMemberRepository {
    pool: PgPool,
}

impl TeamMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<TeamMember>, AppError> {
        let members =
            sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(members)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TeamMember>, AppError> {
        let member = sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(member)
    }

    pub async fn create(&self, data: &TeamMemberInsert<'_>) -> Result<TeamMember, AppError> {
        sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members (
                name, email, position, role, phone, join_date,
                profile_image, status, specializations
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.position)
        .bind(data.role)
        .bind(data.phone)
        .bind(data.join_date)
        .bind(data.profile_image)
        .bind(data.status)
        .bind(data.specializations)
        .fetch_one(&self.pool)
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

    pub async fn update(
        &self,
        id: Uuid,
        data: &TeamMemberUpdate<'_>,
    ) -> Result<Option<TeamMember>, AppError> {
        let member = sqlx::query_as::<_, TeamMember>(
            r#"
            UPDATE team_members SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                position = COALESCE($4, position),
                role = COALESCE($5, role),
                phone = COALESCE($6, phone),
                join_date = COALESCE($7, join_date),
                profile_image = COALESCE($8, profile_image),
                status = COALESCE($9, status),
                specializations = COALESCE($10, specializations),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.email)
        .bind(data.position)
        .bind(data.role)
        .bind(data.phone)
        .bind(data.join_date)
        .bind(data.profile_image)
        .bind(data.status)
        .bind(data.specializations)
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

        Ok(member)
    }

    // Devolve o registro removido para a limpeza do arquivo de imagem
    pub async fn delete(&self, id: Uuid) -> Result<Option<TeamMember>, AppError> {
        let member =
            sqlx::query_as::<_, TeamMember>("DELETE FROM team_members WHERE id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(member)
    }
}
