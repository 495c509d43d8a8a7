pub mod auth;
pub mod case_service;
pub mod catalog_service;
pub mod client_service;
pub mod invoice_service;
pub mod notification_service;
pub mod task_service;
pub mod team_member_service;
pub mod upload_service;
