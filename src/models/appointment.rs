// src/models/appointment.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub title: String,
    pub client_id: Option<Uuid>,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:30:00")]
    pub time: NaiveTime,
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: AppointmentStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,
    pub client_id: Option<Uuid>,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:30:00")]
    pub time: NaiveTime,
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: Option<String>,
    pub client_id: Option<Uuid>,
    #[schema(value_type = String, format = Date)]
    pub date: Option<NaiveDate>,
    #[schema(value_type = String, example = "14:30:00")]
    pub time: Option<NaiveTime>,
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetAppointmentStatusPayload {
    pub status: AppointmentStatus,
}
