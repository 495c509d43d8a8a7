// src/db/notification_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::notification::{
        Notification, NotificationKind, NotificationRow, RecipientKind, ReferenceModel,
    },
};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        recipient_id: Uuid,
        recipient_kind: RecipientKind,
        title: &str,
        message: &str,
        kind: NotificationKind,
        reference: Option<(ReferenceModel, Uuid)>,
    ) -> Result<Notification, AppError> {
        let (ref_model, ref_id) = match reference {
            Some((model, id)) => (Some(model), Some(id)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, NotificationRow>(
            r#"
            INSERT INTO notifications (
                recipient_id, recipient_kind, title, message, kind, ref_model, ref_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(recipient_id)
        .bind(recipient_kind)
        .bind(title)
        .bind(message)
        .bind(kind)
        .bind(ref_model)
        .bind(ref_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    // Lista paginada + total + não lidas, tudo escopado ao destinatário
    pub async fn list(
        &self,
        recipient_id: Uuid,
        recipient_kind: RecipientKind,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Notification>, i64, i64), AppError> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT * FROM notifications
            WHERE recipient_id = $1 AND recipient_kind = $2
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(recipient_id)
        .bind(recipient_kind)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND recipient_kind = $2",
        )
        .bind(recipient_id)
        .bind(recipient_kind)
        .fetch_one(&self.pool)
        .await?;

        let unread: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND recipient_kind = $2 AND read = FALSE",
        )
        .bind(recipient_id)
        .bind(recipient_kind)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.into_iter().map(Notification::from).collect(), total, unread))
    }

    pub async fn mark_read(
        &self,
        id: Uuid,
        recipient_id: Uuid,
        recipient_kind: RecipientKind,
    ) -> Result<Option<Notification>, AppError> {
        let row = sqlx::query_as::<_, NotificationRow>(
            r#"
            UPDATE notifications SET read = TRUE, updated_at = NOW()
            WHERE id = $1 AND recipient_id = $2 AND recipient_kind = $3
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(recipient_id)
        .bind(recipient_kind)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Notification::from))
    }

    pub async fn mark_all_read(
        &self,
        recipient_id: Uuid,
        recipient_kind: RecipientKind,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET read = TRUE, updated_at = NOW()
            WHERE recipient_id = $1 AND recipient_kind = $2 AND read = FALSE
            "#,
        )
        .bind(recipient_id)
        .bind(recipient_kind)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(
        &self,
        id: Uuid,
        recipient_id: Uuid,
        recipient_kind: RecipientKind,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM notifications WHERE id = $1 AND recipient_id = $2 AND recipient_kind = $3",
        )
        .bind(id)
        .bind(recipient_id)
        .bind(recipient_kind)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_read(
        &self,
        recipient_id: Uuid,
        recipient_kind: RecipientKind,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "DELETE FROM notifications WHERE recipient_id = $1 AND recipient_kind = $2 AND read = TRUE",
        )
        .bind(recipient_id)
        .bind(recipient_kind)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
