// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,

    // true = ativo, false = inativo (soft delete)
    pub status: bool,

    // Processos vinculados a este cliente
    pub case_ids: Vec<Uuid>,

    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Preferências de boas-vindas enviadas junto do cadastro.
// Os corpos aceitam placeholders {{name}}, {{email}} e {{company}}.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    #[serde(default)]
    pub send_email: bool,
    #[serde(default)]
    pub send_sms: bool,
    pub email_template: Option<String>,
    pub sms_template: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub notification_settings: Option<NotificationSettings>,
}

// Atualização rasa: apenas os campos presentes são sobrescritos
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ClientListQuery {
    pub status: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DeleteClientQuery {
    // ?hard=true remove o documento; o padrão é o soft delete
    pub hard: Option<bool>,
}

// Resposta enxuta de GET /clients/{id}/status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientStatus {
    pub active: bool,
    pub label: String,
}
