// src/handlers/clients.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        response::{page_params, ApiResponse, Paginated},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminOnly, RequireRole, StaffOnly},
    },
    models::client::{
        Client, ClientListQuery, ClientStatus, CreateClientPayload, DeleteClientQuery,
        UpdateClientPayload,
    },
};

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clientes",
    params(ClientListQuery),
    responses(
        (status = 200, description = "Lista paginada de clientes", body = Paginated<Client>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Query(query): Query<ClientListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = page_params(query.page, query.limit);

    let (clients, total) = app_state
        .client_repo
        .list(query.status, query.search.as_deref(), limit, offset)
        .await?;

    Ok(Json(ApiResponse::success(
        "Clientes listados com sucesso.",
        Paginated::new(clients, total, page, limit),
    )))
}

// GET /api/clients/{id}
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state
        .client_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Cliente"))?;

    Ok(Json(ApiResponse::success("Cliente encontrado.", client)))
}

// GET /api/clients/{id}/status — consulta leve usada pelo portal do cliente
#[utoipa::path(
    get,
    path = "/api/clients/{id}/status",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Status do cliente", body = ClientStatus),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client_status(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state
        .client_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Cliente"))?;

    let status = ClientStatus {
        active: client.status,
        label: if client.status { "Active" } else { "Inactive" }.to_string(),
    };

    Ok(Json(ApiResponse::success("Status do cliente.", status)))
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clientes",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let client = app_state.client_service.create(&payload, user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Cliente criado com sucesso.", client)),
    ))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let client = app_state
        .client_repo
        .update(id, &payload)
        .await?
        .ok_or(AppError::NotFound("Cliente"))?;

    Ok(Json(ApiResponse::success(
        "Cliente atualizado com sucesso.",
        client,
    )))
}

// DELETE /api/clients/{id}?hard=true
//
// Sem `hard`, apenas inativa. Com `hard`, remove de vez, desde que nenhum
// processo, fatura ou agendamento ainda aponte para o cliente.
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clientes",
    params(
        ("id" = Uuid, Path, description = "ID do cliente"),
        DeleteClientQuery
    ),
    responses(
        (status = 200, description = "Cliente removido ou inativado"),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Registros vinculados impedem a remoção")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    _admin: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteClientQuery>,
) -> Result<impl IntoResponse, AppError> {
    let hard = query.hard.unwrap_or(false);
    app_state.client_service.delete(id, hard).await?;

    let message = if hard {
        "Cliente removido definitivamente."
    } else {
        "Cliente inativado."
    };

    Ok(Json(ApiResponse::success(message, ())))
}
