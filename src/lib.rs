// src/lib.rs
//
// O binário em main.rs monta o servidor; o restante fica exposto como
// biblioteca para que o módulo api_client possa ser consumido à parte.

pub mod api_client;
pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
