// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginUserPayload, RegisterUserPayload, User},
};

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário registrado", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (token, user) = app_state.auth_service.register_user(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Usuário registrado com sucesso.",
            AuthResponse { token, user },
        )),
    ))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login realizado", body = AuthResponse),
        (status = 400, description = "Credenciais inválidas"),
        (status = 403, description = "Conta de cliente inativa")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (token, user) = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Login realizado com sucesso.",
            AuthResponse { token, user },
        )),
    ))
}

// GET /api/auth/user — perfil do portador do token
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = "Auth",
    responses(
        (status = 200, description = "Perfil do usuário autenticado", body = User),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(AuthenticatedUser(user): AuthenticatedUser) -> impl IntoResponse {
    Json(ApiResponse::success("Usuário autenticado.", user))
}
