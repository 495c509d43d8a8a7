// src/services/invoice_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::InvoiceRepository,
    models::invoice::{
        CreateInvoicePayload, Invoice, InvoiceItem, InvoiceStatus, UpdateInvoicePayload,
    },
};

// Derivação de status a cada pagamento. "Overdue" nunca sai daqui: só é
// alcançável pelo PATCH /status manual.
pub fn derive_status(paid: Decimal, total: Decimal) -> InvoiceStatus {
    if paid >= total {
        InvoiceStatus::Paid
    } else if paid > Decimal::ZERO {
        InvoiceStatus::PartiallyPaid
    } else {
        InvoiceStatus::Unpaid
    }
}

// INV- + sequência com seis dígitos
pub fn format_invoice_no(sequence: i64) -> String {
    format!("INV-{:06}", sequence)
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| {
            chrono::DateTime::parse_from_rfc3339(raw).map(|datetime| datetime.date_naive())
        })
        .map_err(|_| AppError::BadRequest(format!("{} não é uma data válida.", field)))
}

#[derive(Debug)]
pub struct ValidatedInvoice {
    pub client_id: uuid::Uuid,
    pub client_name: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<InvoiceItem>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

// Validação ordenada da criação: cada falha é um 400 com motivo próprio,
// na mesma ordem do contrato.
pub fn validate_create(payload: &CreateInvoicePayload) -> Result<ValidatedInvoice, AppError> {
    let client_id = payload
        .client_id
        .ok_or_else(|| AppError::BadRequest("clientId é obrigatório.".to_string()))?;

    let client_name = payload
        .client_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("clientName é obrigatório.".to_string()))?
        .to_string();

    let issue_date = parse_date(
        payload
            .issue_date
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("issueDate não é uma data válida.".to_string()))?,
        "issueDate",
    )?;

    let due_date = parse_date(
        payload
            .due_date
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("dueDate não é uma data válida.".to_string()))?,
        "dueDate",
    )?;

    let items = payload.items.clone().unwrap_or_default();
    if items.is_empty() {
        return Err(AppError::BadRequest(
            "A fatura precisa de ao menos um item.".to_string(),
        ));
    }

    validate_items(&items)?;

    let subtotal = payload
        .subtotal
        .filter(|value| *value >= Decimal::ZERO)
        .ok_or_else(|| AppError::BadRequest("subtotal inválido.".to_string()))?;

    let total = payload
        .total
        .filter(|value| *value >= Decimal::ZERO)
        .ok_or_else(|| AppError::BadRequest("total inválido.".to_string()))?;

    Ok(ValidatedInvoice {
        client_id,
        client_name,
        issue_date,
        due_date,
        items,
        subtotal,
        tax_rate: payload.tax_rate.unwrap_or(Decimal::ZERO),
        tax_amount: payload.tax_amount.unwrap_or(Decimal::ZERO),
        total,
    })
}

fn validate_items(items: &[InvoiceItem]) -> Result<(), AppError> {
    for (index, item) in items.iter().enumerate() {
        if item.description.trim().is_empty() {
            return Err(AppError::BadRequest(format!(
                "O item {} está sem descrição.",
                index + 1
            )));
        }
        if item.quantity <= Decimal::ZERO {
            return Err(AppError::BadRequest(format!(
                "O item {} tem quantidade inválida.",
                index + 1
            )));
        }
        if item.rate < Decimal::ZERO {
            return Err(AppError::BadRequest(format!(
                "O item {} tem valor unitário inválido.",
                index + 1
            )));
        }
        if item.amount < Decimal::ZERO {
            return Err(AppError::BadRequest(format!(
                "O item {} tem total inválido.",
                index + 1
            )));
        }
    }

    Ok(())
}

#[derive(Clone)]
pub struct InvoiceService {
    repo: InvoiceRepository,
}

impl InvoiceService {
    pub fn new(repo: InvoiceRepository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, payload: &CreateInvoicePayload) -> Result<Invoice, AppError> {
        let validated = validate_create(payload)?;

        // Numeração por contagem: colisões sob concorrência viram 409 e
        // ficam a cargo do chamador (sem lock nem retry no servidor).
        let count = self.repo.count_all().await?;
        let invoice_no = format_invoice_no(count + 1);

        self.repo
            .insert(&crate::db::invoice_repo::InvoiceInsert {
                invoice_no: &invoice_no,
                client_id: validated.client_id,
                client_name: &validated.client_name,
                issue_date: validated.issue_date,
                due_date: validated.due_date,
                items: &validated.items,
                subtotal: validated.subtotal,
                tax_rate: validated.tax_rate,
                tax_amount: validated.tax_amount,
                total: validated.total,
            })
            .await
    }

    // Merge parcial com re-validação dos campos presentes
    pub async fn update(
        &self,
        id: uuid::Uuid,
        payload: &UpdateInvoicePayload,
    ) -> Result<Invoice, AppError> {
        let issue_date = payload
            .issue_date
            .as_deref()
            .map(|raw| parse_date(raw, "issueDate"))
            .transpose()?;
        let due_date = payload
            .due_date
            .as_deref()
            .map(|raw| parse_date(raw, "dueDate"))
            .transpose()?;

        if let Some(items) = &payload.items {
            if items.is_empty() {
                return Err(AppError::BadRequest(
                    "A fatura precisa de ao menos um item.".to_string(),
                ));
            }
            validate_items(items)?;
        }

        for (value, field) in [(payload.subtotal, "subtotal"), (payload.total, "total")] {
            if value.is_some_and(|v| v < Decimal::ZERO) {
                return Err(AppError::BadRequest(format!("{} inválido.", field)));
            }
        }

        self.repo
            .update(
                id,
                payload.client_name.as_deref(),
                issue_date,
                due_date,
                payload.items.as_deref(),
                payload.subtotal,
                payload.tax_rate,
                payload.tax_amount,
                payload.total,
            )
            .await?
            .ok_or(AppError::NotFound("Fatura"))
    }

    pub async fn record_payment(
        &self,
        id: uuid::Uuid,
        amount: Decimal,
    ) -> Result<Invoice, AppError> {
        if amount <= Decimal::ZERO {
            return Err(AppError::BadRequest(
                "O valor do pagamento deve ser maior que zero.".to_string(),
            ));
        }

        let invoice = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Fatura"))?;

        let new_paid = invoice.amount_paid + amount;
        let status = derive_status(new_paid, invoice.total);

        self.repo
            .apply_payment(id, new_paid, status)
            .await?
            .ok_or(AppError::NotFound("Fatura"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    fn payload() -> CreateInvoicePayload {
        CreateInvoicePayload {
            client_id: Some(uuid::Uuid::new_v4()),
            client_name: Some("Cliente Exemplo".into()),
            issue_date: Some("2025-06-01".into()),
            due_date: Some("2025-07-01".into()),
            items: Some(vec![InvoiceItem {
                service_id: None,
                description: "Consulta".into(),
                quantity: dec("2"),
                rate: dec("100"),
                amount: dec("200"),
            }]),
            subtotal: Some(dec("200")),
            tax_rate: None,
            tax_amount: None,
            total: Some(dec("200")),
        }
    }

    #[test]
    fn status_truth_table() {
        assert_eq!(derive_status(dec("200"), dec("200")), InvoiceStatus::Paid);
        assert_eq!(derive_status(dec("250"), dec("200")), InvoiceStatus::Paid);
        assert_eq!(
            derive_status(dec("50"), dec("200")),
            InvoiceStatus::PartiallyPaid
        );
        assert_eq!(derive_status(dec("0"), dec("200")), InvoiceStatus::Unpaid);
    }

    #[test]
    fn invoice_number_is_zero_padded() {
        assert_eq!(format_invoice_no(1), "INV-000001");
        assert_eq!(format_invoice_no(42), "INV-000042");
        assert_eq!(format_invoice_no(123456), "INV-123456");
    }

    #[test]
    fn valid_payload_passes() {
        let validated = validate_create(&payload()).unwrap();
        assert_eq!(validated.total, dec("200"));
        assert_eq!(validated.items.len(), 1);
    }

    #[test]
    fn missing_client_id_is_first_failure() {
        let mut p = payload();
        p.client_id = None;
        p.client_name = None; // clientId vem antes de clientName
        let err = validate_create(&p).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("clientId")));
    }

    #[test]
    fn bad_date_is_rejected() {
        let mut p = payload();
        p.issue_date = Some("31/06/2025".into());
        let err = validate_create(&p).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("issueDate")));
    }

    #[test]
    fn empty_items_are_rejected() {
        let mut p = payload();
        p.items = Some(vec![]);
        assert!(validate_create(&p).is_err());
    }

    #[test]
    fn zero_quantity_item_is_rejected() {
        let mut p = payload();
        p.items.as_mut().unwrap()[0].quantity = dec("0");
        let err = validate_create(&p).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("quantidade")));
    }

    #[test]
    fn negative_subtotal_is_rejected() {
        let mut p = payload();
        p.subtotal = Some(dec("-1"));
        assert!(validate_create(&p).is_err());
    }
}
