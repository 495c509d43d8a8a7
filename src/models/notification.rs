// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "recipient_kind")]
pub enum RecipientKind {
    User,
    Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notification_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Case,
    Appointment,
    Task,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reference_model")]
pub enum ReferenceModel {
    Case,
    Appointment,
    Task,
}

// União fechada no lugar do par frouxo (id + nome de model) do mundo
// document-oriented. Serializa como {"model": "Case", "id": "..."}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "model", content = "id")]
pub enum NotificationRef {
    Case(Uuid),
    Appointment(Uuid),
    Task(Uuid),
}

impl NotificationRef {
    pub fn split(self) -> (ReferenceModel, Uuid) {
        match self {
            NotificationRef::Case(id) => (ReferenceModel::Case, id),
            NotificationRef::Appointment(id) => (ReferenceModel::Appointment, id),
            NotificationRef::Task(id) => (ReferenceModel::Task, id),
        }
    }

    pub fn join(model: ReferenceModel, id: Uuid) -> Self {
        match model {
            ReferenceModel::Case => NotificationRef::Case(id),
            ReferenceModel::Appointment => NotificationRef::Appointment(id),
            ReferenceModel::Task => NotificationRef::Task(id),
        }
    }
}

// Linha crua do banco; vira `Notification` antes de sair pela API
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub recipient_kind: RecipientKind,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub ref_model: Option<ReferenceModel>,
    pub ref_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub recipient_kind: RecipientKind,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<NotificationRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        let reference = match (row.ref_model, row.ref_id) {
            (Some(model), Some(id)) => Some(NotificationRef::join(model, id)),
            _ => None,
        };
        Notification {
            id: row.id,
            recipient_id: row.recipient_id,
            recipient_kind: row.recipient_kind,
            title: row.title,
            message: row.message,
            kind: row.kind,
            read: row.read,
            reference,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationPayload {
    pub recipient_id: Uuid,
    pub recipient_kind: RecipientKind,
    pub title: String,
    pub message: String,
    pub kind: Option<NotificationKind>,
    pub reference: Option<NotificationRef>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct NotificationListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// Lista paginada + contadores que o sino do frontend exibe
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationList {
    pub data: Vec<Notification>,
    pub total: i64,
    pub unread_count: i64,
    pub page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_serializes_as_tagged_union() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(NotificationRef::Case(id)).unwrap();
        assert_eq!(json["model"], "Case");
        assert_eq!(json["id"], serde_json::json!(id));
    }

    #[test]
    fn reference_roundtrip_split_join() {
        let id = Uuid::new_v4();
        for reference in [
            NotificationRef::Case(id),
            NotificationRef::Appointment(id),
            NotificationRef::Task(id),
        ] {
            let (model, raw) = reference.split();
            assert_eq!(NotificationRef::join(model, raw), reference);
        }
    }

    #[test]
    fn row_without_reference_maps_to_none() {
        let row = NotificationRow {
            id: Uuid::new_v4(),
            recipient_id: Uuid::new_v4(),
            recipient_kind: RecipientKind::User,
            title: "t".into(),
            message: "m".into(),
            kind: NotificationKind::System,
            read: false,
            ref_model: None,
            ref_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let notification = Notification::from(row);
        assert!(notification.reference.is_none());
    }
}
