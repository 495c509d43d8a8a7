// src/common/response.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Envelope único de sucesso: {success, message, data}.
// O original alternava entre este formato e respostas cruas; aqui todas
// as rotas usam o mesmo envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

// Listagens paginadas: o total permite ao frontend montar a paginação
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        Self {
            data,
            total,
            page,
            limit,
        }
    }
}

// Normaliza page/limit vindos da query string
pub fn page_params(page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * limit;
    (page, limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_defaults_and_clamps() {
        assert_eq!(page_params(None, None), (1, 10, 0));
        assert_eq!(page_params(Some(3), Some(20)), (3, 20, 40));
        assert_eq!(page_params(Some(0), Some(500)), (1, 100, 0));
        assert_eq!(page_params(Some(-2), Some(0)), (1, 1, 0));
    }

    #[test]
    fn success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success("ok", 42)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "ok");
        assert_eq!(body["data"], 42);
    }
}
