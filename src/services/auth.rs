// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{ClientRepository, UserRepository},
    models::auth::{Claims, RegisterUserPayload, User, UserRole},
};

// Tempo de vida do token: 24 horas
const TOKEN_TTL_HOURS: i64 = 24;

pub fn create_token(jwt_secret: &str, user: &User) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::hours(TOKEN_TTL_HOURS);

    let claims = Claims {
        sub: Some(user.id),
        role: user.role,
        client_id: user.client_id,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?)
}

pub fn decode_token(jwt_secret: &str, token: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &validation,
    )
    .map_err(|_| AppError::InvalidToken)?;

    Ok(token_data.claims)
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    client_repo: ClientRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        client_repo: ClientRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            client_repo,
            jwt_secret,
            pool,
        }
    }

    pub async fn register_user(
        &self,
        payload: &RegisterUserPayload,
    ) -> Result<(String, User), AppError> {
        // Hashing fora da transação, pois não toca no banco
        let password_clone = payload.password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let role = payload.role.unwrap_or(UserRole::Lawyer);

        // Usuário e Client vinculado nascem (ou não nascem) juntos
        let mut tx = self.pool.begin().await?;

        let mut new_user = self
            .user_repo
            .create_user(
                &mut *tx,
                &payload.name,
                &payload.email,
                &hashed_password,
                role,
                payload.phone.as_deref(),
            )
            .await?;

        if role == UserRole::Client {
            let client = self
                .client_repo
                .create(
                    &mut *tx,
                    &payload.name,
                    &payload.email,
                    payload.phone.as_deref(),
                    None,
                    None,
                    None,
                    Some(new_user.id),
                )
                .await?;

            self.user_repo
                .set_client_link(&mut *tx, new_user.id, client.id)
                .await?;
            new_user.client_id = Some(client.id);
        }

        tx.commit().await?;

        let token = create_token(&self.jwt_secret, &new_user)?;
        Ok((token, new_user))
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        // Mensagem única para e-mail desconhecido e senha errada
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Conta de cliente inativa não entra
        if user.role == UserRole::Client {
            if let Some(client_id) = user.client_id {
                let client = self
                    .client_repo
                    .find_by_id(client_id)
                    .await?
                    .ok_or(AppError::AccountInactive)?;
                if !client.status {
                    return Err(AppError::AccountInactive);
                }
            }
        }

        let token = create_token(&self.jwt_secret, &user)?;
        Ok((token, user))
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(&self.jwt_secret, token)?;
        let user_id = claims.sub.ok_or(AppError::MissingSubject)?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound("Usuário"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_user(role: UserRole, client_id: Option<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@exemplo.com".into(),
            password_hash: "hash".into(),
            role,
            phone: None,
            client_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_roundtrip_carries_identity() {
        let client_id = Uuid::new_v4();
        let user = sample_user(UserRole::Client, Some(client_id));

        let token = create_token("segredo", &user).unwrap();
        let claims = decode_token("segredo", &token).unwrap();

        assert_eq!(claims.sub, Some(user.id));
        assert_eq!(claims.role, UserRole::Client);
        assert_eq!(claims.client_id, Some(client_id));
    }

    #[test]
    fn token_expires_in_24_hours() {
        let user = sample_user(UserRole::Lawyer, None);
        let token = create_token("segredo", &user).unwrap();
        let claims = decode_token("segredo", &token).unwrap();

        let lifetime = claims.exp as i64 - claims.iat as i64;
        assert_eq!(lifetime, 24 * 60 * 60);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let user = sample_user(UserRole::Lawyer, None);
        let token = create_token("segredo", &user).unwrap();
        assert!(matches!(
            decode_token("outro-segredo", &token),
            Err(AppError::InvalidToken)
        ));
    }
}
