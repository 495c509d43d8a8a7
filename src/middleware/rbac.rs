// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{User, UserRole},
};

/// 1. O Trait que define um conjunto de papéis permitidos
pub trait RoleSet: Send + Sync + 'static {
    fn allowed() -> &'static [UserRole];
}

/// 2. O Extractor (Guardião): rejeita com 403 quem não está no conjunto
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleSet,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().ok_or(AppError::MissingToken)?;

        if !T::allowed().contains(&user.role) {
            return Err(AppError::Forbidden);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// CONJUNTOS DE PAPÉIS
// ---

// Equipe do escritório (exclui contas de cliente)
pub struct StaffOnly;
impl RoleSet for StaffOnly {
    fn allowed() -> &'static [UserRole] {
        &[UserRole::Lawyer, UserRole::Admin]
    }
}

pub struct AdminOnly;
impl RoleSet for AdminOnly {
    fn allowed() -> &'static [UserRole] {
        &[UserRole::Admin]
    }
}
