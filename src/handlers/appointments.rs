// src/handlers/appointments.rs

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
    models::appointment::{
        Appointment, CreateAppointmentPayload, SetAppointmentStatusPayload,
        UpdateAppointmentPayload,
    },
};

// GET /api/appointments — agenda global por data e hora
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Agendamentos",
    responses(
        (status = 200, description = "Agendamentos em ordem cronológica", body = Vec<Appointment>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let appointments = app_state.appointment_repo.list().await?;

    Ok(Json(ApiResponse::success(
        "Agendamentos listados com sucesso.",
        appointments,
    )))
}

// GET /api/appointments/{id}
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Agendamento encontrado", body = Appointment),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state
        .appointment_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Agendamento"))?;

    Ok(Json(ApiResponse::success(
        "Agendamento encontrado.",
        appointment,
    )))
}

// POST /api/appointments
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Agendamentos",
    request_body = CreateAppointmentPayload,
    responses(
        (status = 201, description = "Agendamento criado", body = Appointment),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let appointment = app_state.appointment_repo.create(&payload, user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Agendamento criado com sucesso.",
            appointment,
        )),
    ))
}

// PUT /api/appointments/{id}
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    request_body = UpdateAppointmentPayload,
    responses(
        (status = 200, description = "Agendamento atualizado", body = Appointment),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_appointment(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let appointment = app_state
        .appointment_repo
        .update(id, &payload)
        .await?
        .ok_or(AppError::NotFound("Agendamento"))?;

    Ok(Json(ApiResponse::success(
        "Agendamento atualizado com sucesso.",
        appointment,
    )))
}

// PATCH /api/appointments/{id}/status
#[utoipa::path(
    patch,
    path = "/api/appointments/{id}/status",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    request_body = SetAppointmentStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Appointment),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_appointment_status(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetAppointmentStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state
        .appointment_repo
        .set_status(id, payload.status)
        .await?
        .ok_or(AppError::NotFound("Agendamento"))?;

    Ok(Json(ApiResponse::success(
        "Status do agendamento atualizado.",
        appointment,
    )))
}

// DELETE /api/appointments/{id}
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Agendamento removido"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_appointment(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.appointment_repo.delete(id).await? {
        return Err(AppError::NotFound("Agendamento"));
    }

    Ok(Json(ApiResponse::success("Agendamento removido.", ())))
}
