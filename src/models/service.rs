// src/models/service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "service_category")]
pub enum ServiceCategory {
    Consultation,
    Litigation,
    Documentation,
    Corporate,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    #[schema(example = "100.00")]
    pub amount: Decimal,
    pub category: ServiceCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServicePayload {
    #[validate(length(min = 1, message = "O nome do serviço é obrigatório."))]
    pub name: String,
    pub amount: Decimal,
    // Chega crua e é revalidada para render uma mensagem amigável
    #[schema(example = "Consultation")]
    pub category: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServicePayload {
    #[validate(length(min = 1, message = "O nome do serviço é obrigatório."))]
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    #[schema(example = "Litigation")]
    pub category: Option<String>,
}
