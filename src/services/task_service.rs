// src/services/task_service.rs

use uuid::Uuid;

use crate::{common::error::AppError, models::task::Task};

// Tarefas são pessoais: nenhum papel abre exceção, nem mesmo admin
pub fn ensure_owner(task: &Task, caller: Uuid) -> Result<(), AppError> {
    if task.user_id != caller {
        return Err(AppError::Forbidden);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::{TaskPriority, TaskStatus};
    use chrono::Utc;

    fn task_de(owner: Uuid) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Revisar contrato".to_string(),
            description: None,
            due_date: None,
            start_date: Utc::now(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            completed: false,
            user_id: owner,
            related_to: None,
            related_case_no: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn dono_passa_pela_guarda() {
        let owner = Uuid::new_v4();
        assert!(ensure_owner(&task_de(owner), owner).is_ok());
    }

    #[test]
    fn outro_usuario_recebe_forbidden() {
        let owner = Uuid::new_v4();
        let err = ensure_owner(&task_de(owner), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }
}
