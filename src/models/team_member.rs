// src/models/team_member.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "team_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Lawyer,
    Paralegal,
    Assistant,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "member_status")]
pub enum MemberStatus {
    Active,
    Inactive,
    #[sqlx(rename = "On Leave")]
    #[serde(rename = "On Leave")]
    OnLeave,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub position: String,
    pub role: TeamRole,
    pub phone: Option<String>,
    pub join_date: Option<NaiveDate>,

    // Caminho relativo servido em /uploads/profile-images/...
    pub profile_image: Option<String>,

    pub status: MemberStatus,
    pub specializations: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Os campos chegam como texto cru porque o mesmo payload pode vir de um
// corpo JSON ou de campos multipart; role/status/specializations são
// revalidados à mão para mensagens de erro melhores.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub status: Option<String>,

    // Aceita tanto uma string JSON '["a","b"]' quanto "a, b"
    pub specializations: Option<String>,
}
