// src/services/case_service.rs

use chrono::Utc;
use sqlx::PgPool;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CaseRepository, ClientRepository},
    models::case::{
        Case, CaseDocument, CaseNote, CreateCasePayload, TimelineEntry, UpdateCasePayload,
    },
};

// Campos obrigatórios da criação, conferidos após trim. O mapa de erros
// nomeia exatamente os que vierem em branco (HTTP 422).
pub fn validate_create(payload: &CreateCasePayload) -> Result<(), AppError> {
    let required = [
        ("clientName", payload.client_name.as_deref()),
        ("clientNo", payload.client_no.as_deref()),
        ("caseType", payload.case_type.as_deref()),
        ("court", payload.court.as_deref()),
        ("petitioner", payload.petitioner.as_deref()),
        ("respondent", payload.respondent.as_deref()),
    ];

    let mut errors = BTreeMap::new();
    for (field, value) in required {
        if value.map(str::trim).filter(|v| !v.is_empty()).is_none() {
            errors.insert(field.to_string(), format!("{} é obrigatório.", field));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::FieldErrors(errors))
    }
}

#[derive(Clone)]
pub struct CaseService {
    case_repo: CaseRepository,
    client_repo: ClientRepository,
    pool: PgPool,
}

impl CaseService {
    pub fn new(case_repo: CaseRepository, client_repo: ClientRepository, pool: PgPool) -> Self {
        Self {
            case_repo,
            client_repo,
            pool,
        }
    }

    // A entrada inicial da timeline faz parte do próprio INSERT; o vínculo
    // cliente -> processo entra na mesma transação.
    pub async fn create(&self, payload: &CreateCasePayload, caller: Uuid) -> Result<Case, AppError> {
        validate_create(payload)?;

        let seed = vec![TimelineEntry {
            date: Utc::now(),
            description: "Case created".to_string(),
            added_by: Some(caller),
        }];
        let assigned_to = payload.assigned_to.unwrap_or(caller);

        let mut tx = self.pool.begin().await?;

        let case = self
            .case_repo
            .insert(&mut *tx, payload, seed, caller, assigned_to)
            .await?;

        if let Some(client_id) = payload.client_id {
            self.client_repo
                .append_case(&mut *tx, client_id, case.id)
                .await?;
        }

        tx.commit().await?;
        Ok(case)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateCasePayload,
        caller: Uuid,
    ) -> Result<Case, AppError> {
        let new_timeline: Vec<TimelineEntry> = payload
            .timeline
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|entry| TimelineEntry {
                date: entry.date.unwrap_or_else(Utc::now),
                description: entry.description,
                added_by: Some(caller),
            })
            .collect();

        let new_notes: Vec<CaseNote> = payload
            .notes
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|note| CaseNote {
                content: note.content,
                added_by: Some(caller),
                added_at: Utc::now(),
            })
            .collect();

        self.case_repo
            .update(id, payload, new_timeline, new_notes)
            .await?
            .ok_or(AppError::NotFound("Processo"))
    }

    pub async fn add_document(
        &self,
        id: Uuid,
        title: String,
        url: String,
        caller: Uuid,
    ) -> Result<Case, AppError> {
        let document = CaseDocument {
            title,
            url,
            uploaded_by: Some(caller),
            uploaded_at: Utc::now(),
        };

        self.case_repo
            .append_document(id, document)
            .await?
            .ok_or(AppError::NotFound("Processo"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> CreateCasePayload {
        CreateCasePayload {
            client_name: Some("Maria Silva".into()),
            client_no: Some("CL-007".into()),
            client_id: None,
            case_type: Some("Civil".into()),
            court: Some("1ª Vara Cível".into()),
            court_no: None,
            magistrate: None,
            petitioner: Some("Maria Silva".into()),
            respondent: Some("Empresa X".into()),
            next_hearing: None,
            status: None,
            is_important: None,
            assigned_to: None,
        }
    }

    #[test]
    fn complete_payload_passes() {
        assert!(validate_create(&full_payload()).is_ok());
    }

    #[test]
    fn blank_fields_are_named_exactly() {
        let mut payload = full_payload();
        payload.client_name = Some("   ".into()); // só espaços conta como vazio
        payload.court = None;

        let err = validate_create(&payload).unwrap_err();
        match err {
            AppError::FieldErrors(map) => {
                assert_eq!(
                    map.keys().collect::<Vec<_>>(),
                    vec!["clientName", "court"]
                );
            }
            other => panic!("esperava FieldErrors, veio {:?}", other),
        }
    }

    #[test]
    fn all_blank_names_all_six() {
        let payload = CreateCasePayload {
            client_name: None,
            client_no: None,
            client_id: None,
            case_type: None,
            court: None,
            court_no: None,
            magistrate: None,
            petitioner: None,
            respondent: None,
            next_hearing: None,
            status: None,
            is_important: None,
            assigned_to: None,
        };

        match validate_create(&payload).unwrap_err() {
            AppError::FieldErrors(map) => assert_eq!(map.len(), 6),
            other => panic!("esperava FieldErrors, veio {:?}", other),
        }
    }
}
