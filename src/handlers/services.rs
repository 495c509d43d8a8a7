// src/handlers/services.rs

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
    middleware::{
        auth::AuthenticatedUser,
        rbac::{RequireRole, StaffOnly},
    },
    models::service::{CreateServicePayload, Service, UpdateServicePayload},
    services::catalog_service,
};

// GET /api/services
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Serviços",
    responses(
        (status = 200, description = "Catálogo de serviços", body = Vec<Service>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_services(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let services = app_state.service_repo.list().await?;

    Ok(Json(ApiResponse::success(
        "Serviços listados com sucesso.",
        services,
    )))
}

// GET /api/services/{id}
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "Serviços",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço encontrado", body = Service),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_service(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let service = app_state
        .service_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Serviço"))?;

    Ok(Json(ApiResponse::success("Serviço encontrado.", service)))
}

// POST /api/services
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Serviços",
    request_body = CreateServicePayload,
    responses(
        (status = 201, description = "Serviço criado", body = Service),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Nome de serviço já usado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Json(payload): Json<CreateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let category = catalog_service::parse_category(&payload.category)?;

    let service = app_state
        .service_repo
        .create(payload.name.trim(), payload.amount, category)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Serviço criado com sucesso.", service)),
    ))
}

// PUT /api/services/{id}
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "Serviços",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    request_body = UpdateServicePayload,
    responses(
        (status = 200, description = "Serviço atualizado", body = Service),
        (status = 404, description = "Serviço não encontrado"),
        (status = 409, description = "Nome de serviço já usado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_service(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let category = payload
        .category
        .as_deref()
        .map(catalog_service::parse_category)
        .transpose()?;

    let service = app_state
        .service_repo
        .update(id, payload.name.as_deref().map(str::trim), payload.amount, category)
        .await?
        .ok_or(AppError::NotFound("Serviço"))?;

    Ok(Json(ApiResponse::success(
        "Serviço atualizado com sucesso.",
        service,
    )))
}

// DELETE /api/services/{id}
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Serviços",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço removido"),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_service(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.service_repo.delete(id).await? {
        return Err(AppError::NotFound("Serviço"));
    }

    Ok(Json(ApiResponse::success("Serviço removido.", ())))
}
