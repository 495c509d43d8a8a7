// src/handlers/notifications.rs
//
// Toda rota é escopada à identidade do chamador: contas de cliente com
// vínculo enxergam as notificações do Client vinculado; o restante, as do
// próprio User.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        response::{page_params, ApiResponse},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{RequireRole, StaffOnly},
    },
    models::{
        auth::{User, UserRole},
        notification::{
            CreateNotificationPayload, Notification, NotificationKind, NotificationList,
            NotificationListQuery, RecipientKind,
        },
    },
};

// Identidade efetiva do chamador para fins de notificação
fn recipient_for(user: &User) -> (Uuid, RecipientKind) {
    match (user.role, user.client_id) {
        (UserRole::Client, Some(client_id)) => (client_id, RecipientKind::Client),
        _ => (user.id, RecipientKind::User),
    }
}

// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notificações",
    params(NotificationListQuery),
    responses(
        (status = 200, description = "Notificações do chamador com contadores", body = NotificationList)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<NotificationListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = page_params(query.page, query.limit);
    let (recipient_id, recipient_kind) = recipient_for(&user);

    let (data, total, unread_count) = app_state
        .notification_repo
        .list(recipient_id, recipient_kind, limit, offset)
        .await?;

    Ok(Json(ApiResponse::success(
        "Notificações listadas com sucesso.",
        NotificationList {
            data,
            total,
            unread_count,
            page,
        },
    )))
}

// POST /api/notifications — emissão manual (eventos de sistema)
#[utoipa::path(
    post,
    path = "/api/notifications",
    tag = "Notificações",
    request_body = CreateNotificationPayload,
    responses(
        (status = 201, description = "Notificação criada", body = Notification)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_notification(
    State(app_state): State<AppState>,
    _staff: RequireRole<StaffOnly>,
    Json(payload): Json<CreateNotificationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let notification = app_state
        .notification_service
        .notify(
            payload.recipient_id,
            payload.recipient_kind,
            &payload.title,
            &payload.message,
            payload.kind.unwrap_or(NotificationKind::System),
            payload.reference.map(|reference| reference.split()),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Notificação criada com sucesso.",
            notification,
        )),
    ))
}

// PATCH /api/notifications/{id}/read
#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    tag = "Notificações",
    params(("id" = Uuid, Path, description = "ID da notificação")),
    responses(
        (status = 200, description = "Notificação marcada como lida", body = Notification),
        (status = 404, description = "Notificação não encontrada para este chamador")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_read(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (recipient_id, recipient_kind) = recipient_for(&user);

    let notification = app_state
        .notification_repo
        .mark_read(id, recipient_id, recipient_kind)
        .await?
        .ok_or(AppError::NotFound("Notificação"))?;

    Ok(Json(ApiResponse::success(
        "Notificação marcada como lida.",
        notification,
    )))
}

// PATCH /api/notifications/read-all
#[utoipa::path(
    patch,
    path = "/api/notifications/read-all",
    tag = "Notificações",
    responses(
        (status = 200, description = "Todas as notificações marcadas como lidas")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_all_read(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let (recipient_id, recipient_kind) = recipient_for(&user);

    let updated = app_state
        .notification_repo
        .mark_all_read(recipient_id, recipient_kind)
        .await?;

    Ok(Json(ApiResponse::success(
        "Notificações marcadas como lidas.",
        json!({ "updated": updated }),
    )))
}

// DELETE /api/notifications/{id}
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    tag = "Notificações",
    params(("id" = Uuid, Path, description = "ID da notificação")),
    responses(
        (status = 200, description = "Notificação removida"),
        (status = 404, description = "Notificação não encontrada para este chamador")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_notification(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (recipient_id, recipient_kind) = recipient_for(&user);

    if !app_state
        .notification_repo
        .delete(id, recipient_id, recipient_kind)
        .await?
    {
        return Err(AppError::NotFound("Notificação"));
    }

    Ok(Json(ApiResponse::success("Notificação removida.", ())))
}

// DELETE /api/notifications/read — limpa as já lidas
#[utoipa::path(
    delete,
    path = "/api/notifications/read",
    tag = "Notificações",
    responses(
        (status = 200, description = "Notificações lidas removidas")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_read(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let (recipient_id, recipient_kind) = recipient_for(&user);

    let removed = app_state
        .notification_repo
        .delete_read(recipient_id, recipient_kind)
        .await?;

    Ok(Json(ApiResponse::success(
        "Notificações lidas removidas.",
        json!({ "removed": removed }),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: UserRole, client_id: Option<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Teste".into(),
            email: "teste@exemplo.com".into(),
            password_hash: "hash".into(),
            role,
            phone: None,
            client_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn conta_de_cliente_vinculada_enxerga_o_client() {
        let client_id = Uuid::new_v4();
        let caller = user(UserRole::Client, Some(client_id));

        let (id, kind) = recipient_for(&caller);
        assert_eq!(id, client_id);
        assert_eq!(kind, RecipientKind::Client);
    }

    #[test]
    fn demais_contas_enxergam_o_proprio_user() {
        let lawyer = user(UserRole::Lawyer, None);
        let (id, kind) = recipient_for(&lawyer);
        assert_eq!(id, lawyer.id);
        assert_eq!(kind, RecipientKind::User);

        // Conta de cliente sem vínculo também cai no próprio User
        let unlinked = user(UserRole::Client, None);
        let (id, kind) = recipient_for(&unlinked);
        assert_eq!(id, unlinked.id);
        assert_eq!(kind, RecipientKind::User);
    }
}
