// src/handlers/tasks.rs
//
// Tarefas são pessoais: toda operação além da criação re-busca o registro
// e confere o dono antes de tocar em qualquer coisa.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::task::{CreateTaskPayload, Task, TaskStatus, UpdateTaskPayload},
    services::task_service,
};

async fn find_owned(app_state: &AppState, id: Uuid, caller: Uuid) -> Result<Task, AppError> {
    let task = app_state
        .task_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Tarefa"))?;

    task_service::ensure_owner(&task, caller)?;

    Ok(task)
}

// GET /api/tasks — sempre as do chamador
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tarefas",
    responses(
        (status = 200, description = "Tarefas do usuário autenticado", body = Vec<Task>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let tasks = app_state.task_repo.list_by_owner(user.id).await?;

    Ok(Json(ApiResponse::success(
        "Tarefas listadas com sucesso.",
        tasks,
    )))
}

// POST /api/tasks
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tarefas",
    request_body = CreateTaskPayload,
    responses(
        (status = 201, description = "Tarefa criada", body = Task),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let task = app_state.task_repo.create(&payload, user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Tarefa criada com sucesso.", task)),
    ))
}

// PUT /api/tasks/{id}
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    request_body = UpdateTaskPayload,
    responses(
        (status = 200, description = "Tarefa atualizada", body = Task),
        (status = 403, description = "Tarefa de outro usuário"),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    find_owned(&app_state, id, user.id).await?;

    let task = app_state
        .task_repo
        .update(id, &payload)
        .await?
        .ok_or(AppError::NotFound("Tarefa"))?;

    Ok(Json(ApiResponse::success(
        "Tarefa atualizada com sucesso.",
        task,
    )))
}

// PATCH /api/tasks/{id}/toggle — inverte `completed` e sincroniza o status
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/toggle",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Conclusão alternada", body = Task),
        (status = 403, description = "Tarefa de outro usuário"),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let task = find_owned(&app_state, id, user.id).await?;

    let completed = !task.completed;
    let status = if completed {
        TaskStatus::Completed
    } else {
        TaskStatus::InProgress
    };

    let task = app_state
        .task_repo
        .set_completed(id, completed, status)
        .await?
        .ok_or(AppError::NotFound("Tarefa"))?;

    Ok(Json(ApiResponse::success(
        "Conclusão da tarefa alternada.",
        task,
    )))
}

// DELETE /api/tasks/{id}
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Tarefa removida"),
        (status = 403, description = "Tarefa de outro usuário"),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    find_owned(&app_state, id, user.id).await?;

    if !app_state.task_repo.delete(id).await? {
        return Err(AppError::NotFound("Tarefa"));
    }

    Ok(Json(ApiResponse::success("Tarefa removida.", ())))
}
