// src/services/team_member_service.rs

use crate::{
    common::error::AppError,
    models::team_member::{MemberStatus, TeamRole},
};

// O frontend manda specializations ora como string JSON '["a","b"]',
// ora como "a, b". Normaliza para uma lista nos dois casos.
pub fn normalize_specializations(raw: &str) -> Vec<String> {
    if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
        return list
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Revalidação dos enums antes do INSERT para mensagens de erro melhores
// do que a violação crua do tipo no banco.
pub fn parse_role(raw: &str) -> Result<TeamRole, AppError> {
    match raw {
        "lawyer" => Ok(TeamRole::Lawyer),
        "paralegal" => Ok(TeamRole::Paralegal),
        "assistant" => Ok(TeamRole::Assistant),
        "admin" => Ok(TeamRole::Admin),
        other => Err(AppError::BadRequest(format!(
            "Papel '{}' inválido. Use lawyer, paralegal, assistant ou admin.",
            other
        ))),
    }
}

pub fn parse_status(raw: &str) -> Result<MemberStatus, AppError> {
    match raw {
        "Active" => Ok(MemberStatus::Active),
        "Inactive" => Ok(MemberStatus::Inactive),
        "On Leave" => Ok(MemberStatus::OnLeave),
        other => Err(AppError::BadRequest(format!(
            "Status '{}' inválido. Use Active, Inactive ou On Leave.",
            other
        ))),
    }
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if validator::ValidateEmail::validate_email(&email) {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "O e-mail fornecido é inválido.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_array_string_is_normalized() {
        assert_eq!(
            normalize_specializations(r#"["Civil", "Trabalhista"]"#),
            vec!["Civil", "Trabalhista"]
        );
    }

    #[test]
    fn comma_separated_string_is_normalized() {
        assert_eq!(
            normalize_specializations("Civil, Trabalhista , Penal"),
            vec!["Civil", "Trabalhista", "Penal"]
        );
    }

    #[test]
    fn empty_entries_are_dropped() {
        assert_eq!(normalize_specializations("Civil,,  ,Penal"), vec!["Civil", "Penal"]);
        assert!(normalize_specializations("").is_empty());
        assert!(normalize_specializations("[]").is_empty());
    }

    #[test]
    fn role_and_status_parse_the_closed_sets() {
        assert_eq!(parse_role("lawyer").unwrap(), TeamRole::Lawyer);
        assert!(parse_role("judge").is_err());
        assert_eq!(parse_status("On Leave").unwrap(), MemberStatus::OnLeave);
        assert!(parse_status("on leave").is_err());
    }

    #[test]
    fn email_regex_check() {
        assert!(validate_email("ana@exemplo.com").is_ok());
        assert!(validate_email("sem-arroba").is_err());
    }
}
