//src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use advocacia_backend::{config::AppState, docs, handlers, middleware::auth::auth_guard};

// Uploads de imagem de perfil ficam um pouco acima dos 5 MB permitidos
// para sobrar espaço para os demais campos do formulário.
const BODY_LIMIT_BYTES: usize = 6 * 1024 * 1024;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é intencional: sem configuração ou banco, a aplicação não sobe.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route(
            "/user",
            get(handlers::auth::get_user).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        );

    let client_routes = Router::new()
        .route(
            "/",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route("/{id}/status", get(handlers::clients::get_client_status));

    let case_routes = Router::new()
        .route(
            "/",
            get(handlers::cases::list_cases).post(handlers::cases::create_case),
        )
        .route(
            "/{id}",
            get(handlers::cases::get_case)
                .put(handlers::cases::update_case)
                .delete(handlers::cases::archive_case),
        )
        .route("/{id}/documents", post(handlers::cases::add_document));

    let invoice_routes = Router::new()
        .route(
            "/",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route(
            "/{id}",
            get(handlers::invoices::get_invoice)
                .put(handlers::invoices::update_invoice)
                .delete(handlers::invoices::delete_invoice),
        )
        .route(
            "/client/{client_id}",
            get(handlers::invoices::list_client_invoices),
        )
        .route("/{id}/status", patch(handlers::invoices::set_invoice_status))
        .route(
            "/{id}/mark-viewed",
            patch(handlers::invoices::mark_invoice_viewed),
        )
        .route("/{id}/payments", post(handlers::invoices::record_payment));

    let service_routes = Router::new()
        .route(
            "/",
            get(handlers::services::list_services).post(handlers::services::create_service),
        )
        .route(
            "/{id}",
            get(handlers::services::get_service)
                .put(handlers::services::update_service)
                .delete(handlers::services::delete_service),
        );

    let appointment_routes = Router::new()
        .route(
            "/",
            get(handlers::appointments::list_appointments)
                .post(handlers::appointments::create_appointment),
        )
        .route(
            "/{id}",
            get(handlers::appointments::get_appointment)
                .put(handlers::appointments::update_appointment)
                .delete(handlers::appointments::delete_appointment),
        )
        .route(
            "/{id}/status",
            patch(handlers::appointments::set_appointment_status),
        );

    let team_member_routes = Router::new()
        .route(
            "/",
            get(handlers::team_members::list_team_members)
                .post(handlers::team_members::create_team_member),
        )
        .route(
            "/{id}",
            get(handlers::team_members::get_team_member)
                .put(handlers::team_members::update_team_member)
                .delete(handlers::team_members::delete_team_member),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES));

    let task_routes = Router::new()
        .route(
            "/",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::tasks::update_task).delete(handlers::tasks::delete_task),
        )
        .route("/{id}/toggle", patch(handlers::tasks::toggle_task));

    let notification_routes = Router::new()
        .route(
            "/",
            get(handlers::notifications::list_notifications)
                .post(handlers::notifications::create_notification),
        )
        .route("/read", delete(handlers::notifications::delete_read))
        .route("/read-all", patch(handlers::notifications::mark_all_read))
        .route(
            "/{id}",
            delete(handlers::notifications::delete_notification),
        )
        .route("/{id}/read", patch(handlers::notifications::mark_read));

    // Tudo abaixo de /api (exceto auth) exige token
    let protected = Router::new()
        .nest("/clients", client_routes)
        .nest("/cases", case_routes)
        .nest("/invoices", invoice_routes)
        .nest("/services", service_routes)
        .nest("/appointments", appointment_routes)
        .nest("/team-members", team_member_routes)
        .nest("/tasks", task_routes)
        .nest("/notifications", notification_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let cors = if app_state.cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    } else {
        CorsLayer::new()
            .allow_origin(
                app_state
                    .cors_origin
                    .parse::<HeaderValue>()
                    .expect("CORS_ORIGIN inválida"),
            )
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };

    let port = app_state.port;
    let upload_dir = app_state.upload_dir.clone();

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
