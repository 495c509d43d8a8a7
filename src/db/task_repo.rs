// src/db/task_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::task::{CreateTaskPayload, Task, TaskStatus, UpdateTaskPayload},
};

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Tarefas são sempre escopadas ao dono
    pub async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE user_id = $1 ORDER BY due_date ASC NULLS LAST, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    pub async fn create(
        &self,
        payload: &CreateTaskPayload,
        user_id: Uuid,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (
                title, description, due_date, start_date, status, priority,
                completed, user_id, related_to, related_case_no
            )
            VALUES (
                $1, $2, $3, COALESCE($4, NOW()), COALESCE($5, 'Pending'),
                COALESCE($6, 'Medium'), $7, $8, $9, $10
            )
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(payload.description.as_deref())
        .bind(payload.due_date)
        .bind(payload.start_date)
        .bind(payload.status)
        .bind(payload.priority)
        .bind(payload.status == Some(TaskStatus::Completed))
        .bind(user_id)
        .bind(payload.related_to.as_deref())
        .bind(payload.related_case_no.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateTaskPayload,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                due_date = COALESCE($4, due_date),
                status = COALESCE($5, status),
                priority = COALESCE($6, priority),
                related_to = COALESCE($7, related_to),
                related_case_no = COALESCE($8, related_case_no),
                completed = COALESCE($5, status) = 'Completed'::task_status,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.title.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.due_date)
        .bind(payload.status)
        .bind(payload.priority)
        .bind(payload.related_to.as_deref())
        .bind(payload.related_case_no.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    // Usado pelo toggle: completed e status andam juntos
    pub async fn set_completed(
        &self,
        id: Uuid,
        completed: bool,
        status: TaskStatus,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET
                completed = $2,
                status = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(completed)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
