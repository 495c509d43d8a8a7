// src/handlers/invoices.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{RequireRole, StaffOnly},
    },
    models::invoice::{
        CreateInvoicePayload, Invoice, RecordPaymentPayload, SetStatusPayload,
        UpdateInvoicePayload,
    },
};

// GET /api/invoices
#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = "Faturas",
    responses(
        (status = 200, description = "Todas as faturas", body = Vec<Invoice>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.invoice_repo.list().await?;

    Ok(Json(ApiResponse::success(
        "Faturas listadas com sucesso.",
        invoices,
    )))
}

// GET /api/invoices/{id}
#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    tag = "Faturas",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura encontrada", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .invoice_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Fatura"))?;

    Ok(Json(ApiResponse::success("Fatura encontrada.", invoice)))
}

// GET /api/invoices/client/{clientId} — mais recentes primeiro
#[utoipa::path(
    get,
    path = "/api/invoices/client/{client_id}",
    tag = "Faturas",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Faturas do cliente por data de emissão", body = Vec<Invoice>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_client_invoices(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.invoice_repo.list_by_client(client_id).await?;

    Ok(Json(ApiResponse::success(
        "Faturas do cliente listadas com sucesso.",
        invoices,
    )))
}

// POST /api/invoices
#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = "Faturas",
    request_body = CreateInvoicePayload,
    responses(
        (status = 201, description = "Fatura criada", body = Invoice),
        (status = 400, description = "Validação falhou; o motivo aponta o primeiro campo inválido"),
        (status = 409, description = "Colisão de numeração; tente novamente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.invoice_service.create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Fatura criada com sucesso.", invoice)),
    ))
}

// PUT /api/invoices/{id}
#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    tag = "Faturas",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    request_body = UpdateInvoicePayload,
    responses(
        (status = 200, description = "Fatura atualizada", body = Invoice),
        (status = 400, description = "Campo presente com valor inválido"),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_invoice(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.invoice_service.update(id, &payload).await?;

    Ok(Json(ApiResponse::success(
        "Fatura atualizada com sucesso.",
        invoice,
    )))
}

// DELETE /api/invoices/{id}
#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    tag = "Faturas",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura removida"),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.invoice_repo.delete(id).await? {
        return Err(AppError::NotFound("Fatura"));
    }

    Ok(Json(ApiResponse::success("Fatura removida.", ())))
}

// PATCH /api/invoices/{id}/status
//
// Sobrescrita direta do enum. É o único caminho para "Overdue": o status
// nunca é derivado de datas automaticamente.
#[utoipa::path(
    patch,
    path = "/api/invoices/{id}/status",
    tag = "Faturas",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    request_body = SetStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_invoice_status(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .invoice_repo
        .set_status(id, payload.status)
        .await?
        .ok_or(AppError::NotFound("Fatura"))?;

    Ok(Json(ApiResponse::success(
        "Status da fatura atualizado.",
        invoice,
    )))
}

// PATCH /api/invoices/{id}/mark-viewed — o portal do cliente sinaliza leitura
#[utoipa::path(
    patch,
    path = "/api/invoices/{id}/mark-viewed",
    tag = "Faturas",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura marcada como visualizada", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_invoice_viewed(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .invoice_repo
        .mark_viewed(id)
        .await?
        .ok_or(AppError::NotFound("Fatura"))?;

    Ok(Json(ApiResponse::success(
        "Fatura marcada como visualizada.",
        invoice,
    )))
}

// POST /api/invoices/{id}/payments
#[utoipa::path(
    post,
    path = "/api/invoices/{id}/payments",
    tag = "Faturas",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    request_body = RecordPaymentPayload,
    responses(
        (status = 200, description = "Pagamento registrado e status recalculado", body = Invoice),
        (status = 400, description = "Valor de pagamento inválido"),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_payment(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .invoice_service
        .record_payment(id, payload.amount)
        .await?;

    Ok(Json(ApiResponse::success(
        "Pagamento registrado com sucesso.",
        invoice,
    )))
}
