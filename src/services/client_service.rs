// src/services/client_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, CaseRepository, ClientRepository, InvoiceRepository},
    models::client::{Client, CreateClientPayload},
    services::notification_service::NotificationService,
};

#[derive(Clone)]
pub struct ClientService {
    client_repo: ClientRepository,
    case_repo: CaseRepository,
    invoice_repo: InvoiceRepository,
    appointment_repo: AppointmentRepository,
    notification_service: NotificationService,
    pool: PgPool,
}

impl ClientService {
    pub fn new(
        client_repo: ClientRepository,
        case_repo: CaseRepository,
        invoice_repo: InvoiceRepository,
        appointment_repo: AppointmentRepository,
        notification_service: NotificationService,
        pool: PgPool,
    ) -> Self {
        Self {
            client_repo,
            case_repo,
            invoice_repo,
            appointment_repo,
            notification_service,
            pool,
        }
    }

    pub async fn create(
        &self,
        payload: &CreateClientPayload,
        created_by: Uuid,
    ) -> Result<Client, AppError> {
        let client = self
            .client_repo
            .create(
                &self.pool,
                payload.name.trim(),
                payload.email.trim(),
                payload.mobile.as_deref(),
                payload.address.as_deref(),
                payload.company.as_deref(),
                payload.notes.as_deref(),
                Some(created_by),
            )
            .await?;

        // Boas-vindas são opcionais e não derrubam a criação se falharem
        if let Some(settings) = &payload.notification_settings {
            if let Err(e) = self
                .notification_service
                .welcome_client(&client, settings)
                .await
            {
                tracing::warn!("Falha ao enviar boas-vindas ao cliente {}: {}", client.id, e);
            }
        }

        Ok(client)
    }

    // Soft delete sempre funciona; hard delete só quando nenhum processo,
    // fatura ou agendamento referencia o cliente, conferidos nessa ordem.
    pub async fn delete(&self, id: Uuid, hard: bool) -> Result<(), AppError> {
        if !hard {
            if self.client_repo.soft_delete(id).await? {
                return Ok(());
            }
            return Err(AppError::NotFound("Cliente"));
        }

        let mut tx = self.pool.begin().await?;

        let cases = self.case_repo.count_by_client(&mut *tx, id).await?;
        if cases > 0 {
            return Err(AppError::ReferentialConflict {
                entity: "processo",
                count: cases,
            });
        }

        let invoices = self.invoice_repo.count_by_client(&mut *tx, id).await?;
        if invoices > 0 {
            return Err(AppError::ReferentialConflict {
                entity: "fatura",
                count: invoices,
            });
        }

        let appointments = self.appointment_repo.count_by_client(&mut *tx, id).await?;
        if appointments > 0 {
            return Err(AppError::ReferentialConflict {
                entity: "agendamento",
                count: appointments,
            });
        }

        let removed = self.client_repo.hard_delete(&mut *tx, id).await?;
        if !removed {
            return Err(AppError::NotFound("Cliente"));
        }

        tx.commit().await?;
        Ok(())
    }
}
