// src/models/case.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "case_status")]
pub enum CaseStatus {
    Pending,
    #[sqlx(rename = "On-Trial")]
    #[serde(rename = "On-Trial")]
    OnTrial,
    Completed,
    Dismissed,
}

// --- Coleções embutidas (JSONB) ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseDocument {
    pub title: String,
    pub url: String,
    pub uploaded_by: Option<Uuid>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub date: DateTime<Utc>,
    pub description: String,
    pub added_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseNote {
    pub content: String,
    pub added_by: Option<Uuid>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: Uuid,
    pub client_name: String,
    pub client_no: String,
    pub client_id: Option<Uuid>,
    pub case_type: String,
    pub court: String,
    pub court_no: Option<String>,
    pub magistrate: Option<String>,
    pub petitioner: String,
    pub respondent: String,
    pub next_hearing: Option<NaiveDate>,
    pub status: CaseStatus,
    pub is_important: bool,
    pub archived: bool,
    pub assigned_to: Option<Uuid>,
    pub created_by: Option<Uuid>,

    #[schema(value_type = Vec<CaseDocument>)]
    pub documents: Json<Vec<CaseDocument>>,
    #[schema(value_type = Vec<TimelineEntry>)]
    pub timeline: Json<Vec<TimelineEntry>>,
    #[schema(value_type = Vec<CaseNote>)]
    pub notes: Json<Vec<CaseNote>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// A validação de criação produz um mapa campo -> mensagem (HTTP 422),
// por isso os obrigatórios chegam como Option e são conferidos à mão.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCasePayload {
    pub client_name: Option<String>,
    pub client_no: Option<String>,
    pub client_id: Option<Uuid>,
    pub case_type: Option<String>,
    pub court: Option<String>,
    pub court_no: Option<String>,
    pub magistrate: Option<String>,
    pub petitioner: Option<String>,
    pub respondent: Option<String>,
    pub next_hearing: Option<NaiveDate>,
    pub status: Option<CaseStatus>,
    pub is_important: Option<bool>,
    pub assigned_to: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCasePayload {
    pub client_name: Option<String>,
    pub client_no: Option<String>,
    pub case_type: Option<String>,
    pub court: Option<String>,
    pub court_no: Option<String>,
    pub magistrate: Option<String>,
    pub petitioner: Option<String>,
    pub respondent: Option<String>,
    pub next_hearing: Option<NaiveDate>,
    pub status: Option<CaseStatus>,
    pub is_important: Option<bool>,
    pub archived: Option<bool>,
    pub assigned_to: Option<Uuid>,

    // Estes dois são SEMPRE anexados ao que já existe, nunca substituídos
    pub timeline: Option<Vec<NewTimelineEntry>>,
    pub notes: Option<Vec<NewCaseNote>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTimelineEntry {
    pub date: Option<DateTime<Utc>>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCaseNote {
    pub content: String,
}

#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddDocumentPayload {
    #[validate(length(min = 1, message = "O título é obrigatório"))]
    pub title: String,
    #[validate(length(min = 1, message = "A URL é obrigatória"))]
    pub url: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CaseListQuery {
    pub status: Option<CaseStatus>,
    pub important: Option<bool>,
    pub archived: Option<bool>,
    pub search: Option<String>,
    pub hearing_from: Option<NaiveDate>,
    pub hearing_to: Option<NaiveDate>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
