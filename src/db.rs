pub mod appointment_repo;
pub mod case_repo;
pub mod client_repo;
pub mod invoice_repo;
pub mod notification_repo;
pub mod service_repo;
pub mod task_repo;
pub mod team_member_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepository;
pub use case_repo::CaseRepository;
pub use client_repo::ClientRepository;
pub use invoice_repo::InvoiceRepository;
pub use notification_repo::NotificationRepository;
pub use service_repo::ServiceRepository;
pub use task_repo::TaskRepository;
pub use team_member_repo::TeamMemberRepository;
pub use user_repo::UserRepository;
