pub mod appointment;
pub mod auth;
pub mod case;
pub mod client;
pub mod invoice;
pub mod notification;
pub mod service;
pub mod task;
pub mod team_member;
