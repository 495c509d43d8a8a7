// src/models/task.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    Pending,
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "task_priority")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub start_date: DateTime<Utc>,
    pub status: TaskStatus,
    pub priority: TaskPriority,

    // Mantido em sincronia com status pelo toggle
    pub completed: bool,

    // Dono da tarefa; toda mutação confere user_id == chamador
    pub user_id: Uuid,

    pub related_to: Option<String>,
    pub related_case_no: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub start_date: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub related_to: Option<String>,
    pub related_case_no: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub related_to: Option<String>,
    pub related_case_no: Option<String>,
}
