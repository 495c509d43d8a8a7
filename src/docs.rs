// src/docs.rs

use crate::handlers;
use crate::models;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_user,

        // --- Clientes ---
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::get_client_status,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Processos ---
        handlers::cases::list_cases,
        handlers::cases::get_case,
        handlers::cases::create_case,
        handlers::cases::update_case,
        handlers::cases::add_document,
        handlers::cases::archive_case,

        // --- Faturas ---
        handlers::invoices::list_invoices,
        handlers::invoices::get_invoice,
        handlers::invoices::list_client_invoices,
        handlers::invoices::create_invoice,
        handlers::invoices::update_invoice,
        handlers::invoices::delete_invoice,
        handlers::invoices::set_invoice_status,
        handlers::invoices::mark_invoice_viewed,
        handlers::invoices::record_payment,

        // --- Serviços ---
        handlers::services::list_services,
        handlers::services::get_service,
        handlers::services::create_service,
        handlers::services::update_service,
        handlers::services::delete_service,

        // --- Agendamentos ---
        handlers::appointments::list_appointments,
        handlers::appointments::get_appointment,
        handlers::appointments::create_appointment,
        handlers::appointments::update_appointment,
        handlers::appointments::set_appointment_status,
        handlers::appointments::delete_appointment,

        // --- Equipe ---
        handlers::team_members::list_team_members,
        handlers::team_members::get_team_member,
        handlers::team_members::create_team_member,
        handlers::team_members::update_team_member,
        handlers::team_members::delete_team_member,

        // --- Tarefas ---
        handlers::tasks::list_tasks,
        handlers::tasks::create_task,
        handlers::tasks::update_task,
        handlers::tasks::toggle_task,
        handlers::tasks::delete_task,

        // --- Notificações ---
        handlers::notifications::list_notifications,
        handlers::notifications::create_notification,
        handlers::notifications::mark_read,
        handlers::notifications::mark_all_read,
        handlers::notifications::delete_notification,
        handlers::notifications::delete_read,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Clientes ---
            models::client::Client,
            models::client::NotificationSettings,
            models::client::CreateClientPayload,
            models::client::UpdateClientPayload,
            models::client::ClientStatus,

            // --- Processos ---
            models::case::CaseStatus,
            models::case::Case,
            models::case::CaseDocument,
            models::case::TimelineEntry,
            models::case::CaseNote,
            models::case::CreateCasePayload,
            models::case::UpdateCasePayload,
            models::case::NewTimelineEntry,
            models::case::NewCaseNote,
            models::case::AddDocumentPayload,

            // --- Faturas ---
            models::invoice::InvoiceStatus,
            models::invoice::InvoiceItem,
            models::invoice::Invoice,
            models::invoice::CreateInvoicePayload,
            models::invoice::UpdateInvoicePayload,
            models::invoice::SetStatusPayload,
            models::invoice::RecordPaymentPayload,

            // --- Serviços ---
            models::service::ServiceCategory,
            models::service::Service,
            models::service::CreateServicePayload,
            models::service::UpdateServicePayload,

            // --- Agendamentos ---
            models::appointment::AppointmentStatus,
            models::appointment::Appointment,
            models::appointment::CreateAppointmentPayload,
            models::appointment::UpdateAppointmentPayload,
            models::appointment::SetAppointmentStatusPayload,

            // --- Equipe ---
            models::team_member::TeamRole,
            models::team_member::MemberStatus,
            models::team_member::TeamMember,
            models::team_member::TeamMemberForm,

            // --- Tarefas ---
            models::task::TaskStatus,
            models::task::TaskPriority,
            models::task::Task,
            models::task::CreateTaskPayload,
            models::task::UpdateTaskPayload,

            // --- Notificações ---
            models::notification::RecipientKind,
            models::notification::NotificationKind,
            models::notification::ReferenceModel,
            models::notification::NotificationRef,
            models::notification::Notification,
            models::notification::CreateNotificationPayload,
            models::notification::NotificationList,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Clientes", description = "Cadastro de Clientes do Escritório"),
        (name = "Processos", description = "Processos Judiciais e seus Anexos"),
        (name = "Faturas", description = "Faturamento e Pagamentos"),
        (name = "Serviços", description = "Catálogo de Serviços Jurídicos"),
        (name = "Agendamentos", description = "Agenda de Audiências e Reuniões"),
        (name = "Equipe", description = "Membros do Escritório"),
        (name = "Tarefas", description = "Tarefas Pessoais"),
        (name = "Notificações", description = "Central de Notificações")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
