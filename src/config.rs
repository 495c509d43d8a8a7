// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, path::PathBuf, time::Duration};

use crate::{
    db::{
        AppointmentRepository, CaseRepository, ClientRepository, InvoiceRepository,
        NotificationRepository, ServiceRepository, TaskRepository, TeamMemberRepository,
        UserRepository,
    },
    services::{
        auth::AuthService, case_service::CaseService, client_service::ClientService,
        invoice_service::InvoiceService, notification_service::NotificationService,
        upload_service::UploadService,
    },
};

// Tentativas de conexão na subida antes de desistir
const DB_CONNECT_ATTEMPTS: u32 = 5;
const DB_CONNECT_RETRY_DELAY: Duration = Duration::from_secs(3);

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub port: u16,
    pub cors_origin: String,
    pub upload_dir: PathBuf,

    // Serviços com regra de negócio
    pub auth_service: AuthService,
    pub case_service: CaseService,
    pub client_service: ClientService,
    pub invoice_service: InvoiceService,
    pub notification_service: NotificationService,
    pub upload_service: UploadService,

    // Repositórios acessados direto pelos handlers de CRUD simples
    pub user_repo: UserRepository,
    pub client_repo: ClientRepository,
    pub case_repo: CaseRepository,
    pub invoice_repo: InvoiceRepository,
    pub service_repo: ServiceRepository,
    pub appointment_repo: AppointmentRepository,
    pub team_member_repo: TeamMemberRepository,
    pub task_repo: TaskRepository,
    pub notification_repo: NotificationRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(3000);
        let cors_origin = env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());
        let upload_dir = PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let db_pool = Self::connect_with_retry(&database_url).await?;

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let case_repo = CaseRepository::new(db_pool.clone());
        let invoice_repo = InvoiceRepository::new(db_pool.clone());
        let service_repo = ServiceRepository::new(db_pool.clone());
        let appointment_repo = AppointmentRepository::new(db_pool.clone());
        let team_member_repo = TeamMemberRepository::new(db_pool.clone());
        let task_repo = TaskRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            client_repo.clone(),
            jwt_secret.clone(),
            db_pool.clone(),
        );
        let notification_service = NotificationService::new(notification_repo.clone());
        let case_service = CaseService::new(
            case_repo.clone(),
            client_repo.clone(),
            db_pool.clone(),
        );
        let client_service = ClientService::new(
            client_repo.clone(),
            case_repo.clone(),
            invoice_repo.clone(),
            appointment_repo.clone(),
            notification_service.clone(),
            db_pool.clone(),
        );
        let invoice_service = InvoiceService::new(invoice_repo.clone());
        let upload_service = UploadService::new(upload_dir.clone());

        Ok(Self {
            db_pool,
            jwt_secret,
            port,
            cors_origin,
            upload_dir,
            auth_service,
            case_service,
            client_service,
            invoice_service,
            notification_service,
            upload_service,
            user_repo,
            client_repo,
            case_repo,
            invoice_repo,
            service_repo,
            appointment_repo,
            team_member_repo,
            task_repo,
            notification_repo,
        })
    }

    // Retenta um número fixo de vezes com atraso fixo; depois disso o
    // processo termina com erro (o main propaga via expect).
    async fn connect_with_retry(database_url: &str) -> anyhow::Result<PgPool> {
        let mut attempt = 1;
        loop {
            match PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(3))
                .connect(database_url)
                .await
            {
                Ok(pool) => {
                    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                    return Ok(pool);
                }
                Err(e) if attempt < DB_CONNECT_ATTEMPTS => {
                    tracing::error!(
                        "🔥 Falha ao conectar ao banco ({}ª de {} tentativas): {}",
                        attempt,
                        DB_CONNECT_ATTEMPTS,
                        e
                    );
                    tokio::time::sleep(DB_CONNECT_RETRY_DELAY).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(anyhow::anyhow!(
                        "Banco de dados indisponível após {} tentativas: {}",
                        DB_CONNECT_ATTEMPTS,
                        e
                    ));
                }
            }
        }
    }
}
