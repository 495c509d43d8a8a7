// src/models/invoice.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status")]
pub enum InvoiceStatus {
    Paid,
    #[sqlx(rename = "Partially Paid")]
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    Unpaid,
    // Nunca derivado automaticamente; só alcançável via PATCH /status
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub service_id: Option<Uuid>,
    pub description: String,
    #[schema(example = "2")]
    pub quantity: Decimal,
    #[schema(example = "100.00")]
    pub rate: Decimal,
    #[schema(example = "200.00")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,

    #[schema(example = "INV-000001")]
    pub invoice_no: String,

    pub client_id: Uuid,
    pub client_name: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,

    #[schema(value_type = Vec<InvoiceItem>)]
    pub items: Json<Vec<InvoiceItem>>,

    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    pub amount_paid: Decimal,

    // Sempre total - amount_paid; calculado no SELECT, nunca armazenado
    pub balance_due: Decimal,

    pub status: InvoiceStatus,
    pub client_viewed: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Criação com validação ordenada feita à mão (cada falha vira um 400
// com motivo próprio), então tudo chega como Option/valor cru.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    pub client_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub items: Option<Vec<InvoiceItem>>,
    pub subtotal: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub total: Option<Decimal>,
}

// Atualização parcial: datas chegam cruas e só são validadas se presentes
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoicePayload {
    pub client_name: Option<String>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub items: Option<Vec<InvoiceItem>>,
    pub subtotal: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub total: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusPayload {
    pub status: InvoiceStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentPayload {
    #[schema(example = "200.00")]
    pub amount: Decimal,
}
