// src/handlers/cases.rs

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
    db::case_repo::CaseFilters,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{RequireRole, StaffOnly},
    },
    models::case::{AddDocumentPayload, Case, CaseListQuery, CreateCasePayload, UpdateCasePayload},
};

// GET /api/cases
#[utoipa::path(
    get,
    path = "/api/cases",
    tag = "Processos",
    params(CaseListQuery),
    responses(
        (status = 200, description = "Lista paginada de processos", body = Paginated<Case>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_cases(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Query(query): Query<CaseListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = page_params(query.page, query.limit);

    let filters = CaseFilters {
        status: query.status,
        important: query.important,
        archived: query.archived,
        search: query.search.as_deref(),
        hearing_from: query.hearing_from,
        hearing_to: query.hearing_to,
    };

    let (cases, total) = app_state.case_repo.list(&filters, limit, offset).await?;

    Ok(Json(ApiResponse::success(
        "Processos listados com sucesso.",
        Paginated::new(cases, total, page, limit),
    )))
}

// GET /api/cases/{id}
#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Processo com documentos, timeline e notas", body = Case),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_case(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let case = app_state
        .case_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Processo"))?;

    Ok(Json(ApiResponse::success("Processo encontrado.", case)))
}

// POST /api/cases
#[utoipa::path(
    post,
    path = "/api/cases",
    tag = "Processos",
    request_body = CreateCasePayload,
    responses(
        (status = 201, description = "Processo criado", body = Case),
        (status = 422, description = "Campos obrigatórios em branco, mapeados por nome")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_case(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateCasePayload>,
) -> Result<impl IntoResponse, AppError> {
    let case = app_state.case_service.create(&payload, user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Processo criado com sucesso.", case)),
    ))
}

// PUT /api/cases/{id} — merge nos campos de topo; timeline e notas do
// payload são anexadas ao histórico existente.
#[utoipa::path(
    put,
    path = "/api/cases/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    request_body = UpdateCasePayload,
    responses(
        (status = 200, description = "Processo atualizado", body = Case),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_case(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCasePayload>,
) -> Result<impl IntoResponse, AppError> {
    let case = app_state.case_service.update(id, &payload, user.id).await?;

    Ok(Json(ApiResponse::success(
        "Processo atualizado com sucesso.",
        case,
    )))
}

// POST /api/cases/{id}/documents
#[utoipa::path(
    post,
    path = "/api/cases/{id}/documents",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    request_body = AddDocumentPayload,
    responses(
        (status = 200, description = "Documento anexado", body = Case),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_document(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddDocumentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let case = app_state
        .case_service
        .add_document(id, payload.title, payload.url, user.id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Documento anexado com sucesso.",
        case,
    )))
}

// DELETE /api/cases/{id} — arquiva, nunca apaga
#[utoipa::path(
    delete,
    path = "/api/cases/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Processo arquivado"),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn archive_case(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.case_repo.archive(id).await? {
        return Err(AppError::NotFound("Processo"));
    }

    Ok(Json(ApiResponse::success("Processo arquivado.", ())))
}
