/// Main Application: relay de webhooks do Basecamp
///
/// Fluxo:
/// - `POST /new-email` recebe o webhook e responde 200 imediatamente
/// - Uma task destacada processa o evento (fire-and-forget)
/// - O TokenManager mantém o access token OAuth2 renovado
/// - Todas as pessoas do projeto são inscritas na conversa e um comentário
///   automático é postado
///
/// SEM fila, SEM retry além do re-auth reativo, SEM dedup entre entregas
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use basecamp_inbox_relay::{auth, config::Settings, services, utils::logging::*, AppState};

use basecamp_inbox_relay::handlers::{handle_new_email, health_check};
use basecamp_inbox_relay::utils::AppError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Carregar variáveis de ambiente do arquivo .env (se existir)
    if dotenvy::dotenv().is_err() {
        // Em produção não existe .env - variáveis vêm do ambiente
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Inicializar tracing
    tracing_subscriber::fmt::init();

    // Carregar configurações
    let settings = Settings::new()
        .map_err(|e| AppError::ConfigError(format!("Failed to load settings: {}", e)))?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    // Cliente da API Basecamp (compartilhado entre probe e processamento)
    let api_client = basecamp::BasecampClient::new(
        settings.basecamp.account_id.clone(),
        settings.basecamp.user_agent.clone(),
    )
    .map_err(|e| AppError::ConfigError(format!("Failed to create Basecamp client: {}", e)))?
    .with_base_url(settings.basecamp.base_url.clone());

    // TokenManager único por processo, injetado em quem chama a API
    let oauth_config = auth::OAuth2Config::from_settings(&settings.oauth);
    let token_manager = Arc::new(auth::TokenManager::new(
        auth::OAuth2Client::new(oauth_config),
        api_client.clone(),
    ));
    log_info("✅ OAuth2 TokenManager initialized");

    let inbox = services::InboxForwardService::new(api_client, token_manager);

    // Inicializar estado da aplicação
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        inbox,
    });

    // Configurar rotas
    let app = Router::new()
        // Health check (público)
        .route("/health", get(health_check))
        // Webhook de inbox forward (público - sempre responde 200)
        .route("/new-email", post(handle_new_email))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Iniciar servidor (PORT do ambiente vence sobre as settings)
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(settings.server.port);
    let listener = TcpListener::bind(format!("{}:{}", settings.server.host, port)).await?;

    log_server_startup(port);
    log_server_ready(port);

    // Graceful shutdown com signal handling
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler para graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
