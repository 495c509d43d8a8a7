// src/services/catalog_service.rs

use crate::{common::error::AppError, models::service::ServiceCategory};

// Revalidação da categoria antes do INSERT para uma mensagem de erro
// melhor do que a violação crua do tipo no banco.
pub fn parse_category(raw: &str) -> Result<ServiceCategory, AppError> {
    match raw {
        "Consultation" => Ok(ServiceCategory::Consultation),
        "Litigation" => Ok(ServiceCategory::Litigation),
        "Documentation" => Ok(ServiceCategory::Documentation),
        "Corporate" => Ok(ServiceCategory::Corporate),
        "Other" => Ok(ServiceCategory::Other),
        other => Err(AppError::BadRequest(format!(
            "Categoria '{}' inválida. Use Consultation, Litigation, Documentation, Corporate ou Other.",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorias_do_conjunto_fechado_passam() {
        assert_eq!(parse_category("Consultation").unwrap(), ServiceCategory::Consultation);
        assert_eq!(parse_category("Other").unwrap(), ServiceCategory::Other);
    }

    #[test]
    fn categoria_desconhecida_vira_bad_request() {
        let err = parse_category("consultation").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("Categoria")));
    }
}
