// src/handlers.rs

pub mod appointments;
pub mod auth;
pub mod cases;
pub mod clients;
pub mod invoices;
pub mod notifications;
pub mod services;
pub mod tasks;
pub mod team_members;
