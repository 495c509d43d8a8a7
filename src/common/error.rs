// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante distinguível do contrato HTTP tem a sua.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Mapa campo -> mensagem (criação de processo, HTTP 422)
    #[error("Campos obrigatórios ausentes")]
    FieldErrors(BTreeMap<String, String>),

    #[error("{0}")]
    BadRequest(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("{0}")]
    UniqueConstraintViolation(String),

    // Bloqueio de integridade referencial no hard delete de cliente
    #[error("Cliente possui {count} registro(s) de {entity} vinculado(s)")]
    ReferentialConflict { entity: &'static str, count: i64 },

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Conta de cliente inativa")]
    AccountInactive,

    #[error("Token ausente")]
    MissingToken,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Token sem subject")]
    MissingSubject,

    #[error("Acesso negado")]
    Forbidden,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("Upload inválido: {0}")]
    UploadError(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Detalhes de validação do `validator` viram um mapa campo -> mensagens
            AppError::ValidationError(errors) => {
                let mut details = BTreeMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "success": false,
                    "message": "Um ou mais campos são inválidos.",
                    "errors": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Mapa montado à mão (processos): nomeia exatamente os campos em branco
            AppError::FieldErrors(details) => {
                let body = Json(json!({
                    "success": false,
                    "message": "Campos obrigatórios ausentes.",
                    "errors": details,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".into())
            }
            AppError::UniqueConstraintViolation(msg) => (StatusCode::CONFLICT, msg),
            AppError::ReferentialConflict { entity, count } => (
                StatusCode::CONFLICT,
                format!(
                    "Não é possível excluir: existem {} registro(s) de {} vinculado(s) a este cliente.",
                    count, entity
                ),
            ),
            AppError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Credenciais inválidas.".into())
            }
            AppError::AccountInactive => (
                StatusCode::FORBIDDEN,
                "A conta deste cliente está inativa.".into(),
            ),
            AppError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação ausente.".into(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido.".into(),
            ),
            AppError::MissingSubject => (
                StatusCode::UNAUTHORIZED,
                "Token sem identificação de usuário.".into(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Você não tem permissão para realizar esta ação.".into(),
            ),
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado.", entity))
            }
            AppError::UploadError(msg) => (StatusCode::BAD_REQUEST, msg),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".into(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn field_errors_map_to_422() {
        let mut details = BTreeMap::new();
        details.insert("clientName".to_string(), "obrigatório".to_string());
        let response = AppError::FieldErrors(details).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn referential_conflict_maps_to_409() {
        let response = AppError::ReferentialConflict {
            entity: "processo",
            count: 2,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn auth_errors_are_distinguishable() {
        assert_eq!(
            AppError::MissingToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::InvalidCredentials.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::AccountInactive.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
