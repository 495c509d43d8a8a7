// src/db/invoice_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{types::Json, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::invoice::{Invoice, InvoiceItem, InvoiceStatus},
};

// Todo SELECT inclui o saldo derivado; balanceDue nunca é armazenado
const INVOICE_COLUMNS: &str = "*, total - amount_paid AS balance_due";

pub struct InvoiceInsert<'a> {
    pub invoice_no: &'a str,
    pub client_id: Uuid,
    pub client_name: &'a str,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: &'a [InvoiceItem],
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

#[derive(Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {} FROM invoices ORDER BY created_at DESC",
            INVOICE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {} FROM invoices WHERE id = $1",
            INVOICE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {} FROM invoices WHERE client_id = $1 ORDER BY issue_date DESC",
            INVOICE_COLUMNS
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    // Base da numeração sequencial INV-NNNNNN
    pub async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn insert(&self, data: &InvoiceInsert<'_>) -> Result<Invoice, AppError> {
        sqlx::query_as::<_, Invoice>(&format!(
            r#"
            INSERT INTO invoices (
                invoice_no, client_id, client_name, issue_date, due_date,
                items, subtotal, tax_rate, tax_amount, total
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            INVOICE_COLUMNS
        ))
        .bind(data.invoice_no)
        .bind(data.client_id)
        .bind(data.client_name)
        .bind(data.issue_date)
        .bind(data.due_date)
        .bind(Json(data.items))
        .bind(data.subtotal)
        .bind(data.tax_rate)
        .bind(data.tax_amount)
        .bind(data.total)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Numeração por contagem corre risco de colisão sob concorrência;
            // o chamador recebe 409 e tenta de novo.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Número de fatura já utilizado. Tente novamente.".to_string(),
                    );
                }
            }
            e.into()
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        client_name: Option<&str>,
        issue_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
        items: Option<&[InvoiceItem]>,
        subtotal: Option<Decimal>,
        tax_rate: Option<Decimal>,
        tax_amount: Option<Decimal>,
        total: Option<Decimal>,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            UPDATE invoices SET
                client_name = COALESCE($2, client_name),
                issue_date = COALESCE($3, issue_date),
                due_date = COALESCE($4, due_date),
                items = COALESCE($5, items),
                subtotal = COALESCE($6, subtotal),
                tax_rate = COALESCE($7, tax_rate),
                tax_amount = COALESCE($8, tax_amount),
                total = COALESCE($9, total),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            INVOICE_COLUMNS
        ))
        .bind(id)
        .bind(client_name)
        .bind(issue_date)
        .bind(due_date)
        .bind(items.map(Json))
        .bind(subtotal)
        .bind(tax_rate)
        .bind(tax_amount)
        .bind(total)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "UPDATE invoices SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            INVOICE_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn mark_viewed(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "UPDATE invoices SET client_viewed = TRUE, updated_at = NOW() WHERE id = $1 RETURNING {}",
            INVOICE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    // O serviço calcula o novo acumulado e o status; aqui só persiste
    pub async fn apply_payment(
        &self,
        id: Uuid,
        amount_paid: Decimal,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            UPDATE invoices SET
                amount_paid = $2,
                status = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            INVOICE_COLUMNS
        ))
        .bind(id)
        .bind(amount_paid)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn count_by_client<'e, E>(&self, executor: E, client_id: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices WHERE client_id = $1")
            .bind(client_id)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}
