// src/handlers/team_members.rs
//
// Criação e edição aceitam JSON puro ou multipart/form-data com o campo
// opcional `profileImage`. O corpo é extraído manualmente para decidir
// entre os dois formatos pelo Content-Type.

use axum::{
    extract::{Multipart, Path, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    Json, RequestExt,
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::rbac::{RequireRole, StaffOnly},
    models::team_member::{MemberStatus, TeamMember, TeamMemberForm},
    services::team_member_service::{
        normalize_specializations, parse_role, parse_status, validate_email,
    },
};

struct UploadedImage {
    bytes: Vec<u8>,
    content_type: String,
}

// Desmonta a requisição em formulário + imagem opcional
async fn extract_form(request: Request) -> Result<(TeamMemberForm, Option<UploadedImage>), AppError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    if !is_multipart {
        let Json(form) = request
            .extract::<Json<TeamMemberForm>, _>()
            .await
            .map_err(|_| AppError::BadRequest("Corpo JSON inválido.".to_string()))?;
        return Ok((form, None));
    }

    let mut multipart = request
        .extract::<Multipart, _>()
        .await
        .map_err(|_| AppError::BadRequest("Formulário multipart inválido.".to_string()))?;

    let mut form = TeamMemberForm::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UploadError(format!("Falha ao ler o formulário: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "profileImage" {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::UploadError(format!("Falha ao receber a imagem: {}", e)))?;
            image = Some(UploadedImage {
                bytes: bytes.to_vec(),
                content_type,
            });
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::UploadError(format!("Falha ao ler o campo {}: {}", name, e)))?;

        match name.as_str() {
            "name" => form.name = Some(text),
            "email" => form.email = Some(text),
            "position" => form.position = Some(text),
            "role" => form.role = Some(text),
            "phone" => form.phone = Some(text),
            "joinDate" => {
                form.join_date = Some(NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(
                    |_| AppError::BadRequest("joinDate não é uma data válida.".to_string()),
                )?)
            }
            "status" => form.status = Some(text),
            "specializations" => form.specializations = Some(text),
            _ => {}
        }
    }

    Ok((form, image))
}

// GET /api/team-members
#[utoipa::path(
    get,
    path = "/api/team-members",
    tag = "Equipe",
    responses(
        (status = 200, description = "Membros da equipe por nome", body = Vec<TeamMember>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_team_members(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
) -> Result<impl IntoResponse, AppError> {
    let members = app_state.team_member_repo.list().await?;

    Ok(Json(ApiResponse::success(
        "Equipe listada com sucesso.",
        members,
    )))
}

// GET /api/team-members/{id}
#[utoipa::path(
    get,
    path = "/api/team-members/{id}",
    tag = "Equipe",
    params(("id" = Uuid, Path, description = "ID do membro")),
    responses(
        (status = 200, description = "Membro encontrado", body = TeamMember),
        (status = 404, description = "Membro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_team_member(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let member = app_state
        .team_member_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Membro da equipe"))?;

    Ok(Json(ApiResponse::success("Membro encontrado.", member)))
}

// POST /api/team-members — JSON ou multipart
#[utoipa::path(
    post,
    path = "/api/team-members",
    tag = "Equipe",
    request_body(content = TeamMemberForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Membro criado", body = TeamMember),
        (status = 400, description = "Dados ou imagem inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_team_member(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    request: Request,
) -> Result<impl IntoResponse, AppError> {
    let (form, image) = extract_form(request).await?;

    let name = form
        .name
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest("O nome é obrigatório.".to_string()))?;
    let email = form
        .email
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest("O e-mail é obrigatório.".to_string()))?;
    validate_email(email)?;

    let position = form
        .position
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest("O cargo é obrigatório.".to_string()))?;
    let role = parse_role(
        form.role
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("O papel é obrigatório.".to_string()))?,
    )?;
    let status = form
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?
        .unwrap_or(MemberStatus::Active);
    let specializations = form
        .specializations
        .as_deref()
        .map(normalize_specializations)
        .unwrap_or_default();

    let profile_image = match image {
        Some(upload) => Some(
            app_state
                .upload_service
                .save_profile_image(&upload.bytes, &upload.content_type)
                .await?,
        ),
        None => None,
    };

    let member = app_state
        .team_member_repo
        .create(&crate::db::team_member_repo::TeamMemberInsert {
            name,
            email,
            position,
            role,
            phone: form.phone.as_deref(),
            join_date: form.join_date,
            profile_image: profile_image.as_deref(),
            status,
            specializations: &specializations,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Membro criado com sucesso.", member)),
    ))
}

// PUT /api/team-members/{id} — JSON ou multipart; imagem nova substitui e
// apaga a antiga (best effort)
#[utoipa::path(
    put,
    path = "/api/team-members/{id}",
    tag = "Equipe",
    params(("id" = Uuid, Path, description = "ID do membro")),
    request_body(content = TeamMemberForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Membro atualizado", body = TeamMember),
        (status = 404, description = "Membro não encontrado"),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_team_member(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
    request: Request,
) -> Result<impl IntoResponse, AppError> {
    let existing = app_state
        .team_member_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Membro da equipe"))?;

    let (form, image) = extract_form(request).await?;

    if let Some(email) = form.email.as_deref() {
        validate_email(email.trim())?;
    }
    let role = form.role.as_deref().map(parse_role).transpose()?;
    let status = form.status.as_deref().map(parse_status).transpose()?;
    let specializations = form
        .specializations
        .as_deref()
        .map(normalize_specializations);

    let new_image = match image {
        Some(upload) => Some(
            app_state
                .upload_service
                .save_profile_image(&upload.bytes, &upload.content_type)
                .await?,
        ),
        None => None,
    };

    let member = app_state
        .team_member_repo
        .update(
            id,
            &crate::db::team_member_repo::TeamMemberUpdate {
                name: form.name.as_deref().map(str::trim),
                email: form.email.as_deref().map(str::trim),
                position: form.position.as_deref().map(str::trim),
                role,
                phone: form.phone.as_deref(),
                join_date: form.join_date,
                profile_image: new_image.as_deref(),
                status,
                specializations: specializations.as_deref(),
            },
        )
        .await?
        .ok_or(AppError::NotFound("Membro da equipe"))?;

    // A imagem antiga só sai do disco depois que a troca persistiu
    if new_image.is_some() {
        if let Some(old) = existing.profile_image.as_deref() {
            app_state.upload_service.delete_public_file(old).await;
        }
    }

    Ok(Json(ApiResponse::success(
        "Membro atualizado com sucesso.",
        member,
    )))
}

// DELETE /api/team-members/{id}
#[utoipa::path(
    delete,
    path = "/api/team-members/{id}",
    tag = "Equipe",
    params(("id" = Uuid, Path, description = "ID do membro")),
    responses(
        (status = 200, description = "Membro removido"),
        (status = 404, description = "Membro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_team_member(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let member = app_state
        .team_member_repo
        .delete(id)
        .await?
        .ok_or(AppError::NotFound("Membro da equipe"))?;

    if let Some(image) = member.profile_image.as_deref() {
        app_state.upload_service.delete_public_file(image).await;
    }

    Ok(Json(ApiResponse::success("Membro removido.", ())))
}
