use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::time::Instant;

use crate::services::ProcessingOutcome;
use crate::utils::logging::*;
use crate::AppState;

/// `POST /new-email` — webhook de inbox forward do Basecamp
///
/// O processamento roda numa task destacada; a resposta nunca espera (nem
/// reflete) o resultado. O remetente do webhook sempre vê 200.
pub async fn handle_new_email(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    let start_time = Instant::now();
    log_request_received("/new-email", "POST");

    let inbox = state.inbox.clone();

    // Processar em background (não bloqueia a resposta)
    tokio::spawn(async move {
        match inbox.process_payload(payload).await {
            Ok(ProcessingOutcome::Ignored { kind }) => log_webhook_ignored(&kind),
            Ok(ProcessingOutcome::Completed { bucket, subscribed }) => {
                log_webhook_processed(bucket, subscribed)
            }
            // Boundary único de contenção: o erro é logado (preferindo o
            // payload de resposta do upstream) e descartado
            Err(e) => match e.upstream_body() {
                Some(body) => log_error(&format!("Webhook processing failed: {}", body)),
                None => log_error(&format!("Webhook processing failed: {}", e)),
            },
        }
    });

    let processing_time = start_time.elapsed().as_millis() as u64;
    log_request_processed("/new-email", 200, processing_time);

    Json(json!({
        "message": "Success"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{OAuth2Client, OAuth2Config, TokenManager};
    use crate::config::settings::{BasecampSettings, OAuthSettings, ServerSettings, Settings};
    use crate::services::InboxForwardService;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use basecamp::BasecampClient;
    use tower::ServiceExt;

    /// Estado apontando para um upstream que recusa conexões: qualquer
    /// processamento real falha, o que não pode vazar para a resposta HTTP
    fn state_with_dead_upstream() -> Arc<AppState> {
        let dead_upstream = "http://127.0.0.1:9";

        let settings = Settings {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            basecamp: BasecampSettings {
                account_id: "999999".to_string(),
                user_agent: "Inbox Relay (test)".to_string(),
                base_url: dead_upstream.to_string(),
            },
            oauth: OAuthSettings {
                client_id: "test-client".to_string(),
                client_secret: "test-secret".to_string(),
                redirect_uri: "https://example.com/callback".to_string(),
                refresh_token: "test-refresh".to_string(),
                token_url: format!("{}/authorization/token", dead_upstream),
            },
        };

        let api_client = BasecampClient::new("999999", "Inbox Relay (test)")
            .unwrap()
            .with_base_url(dead_upstream);

        let token_manager = Arc::new(TokenManager::new(
            OAuth2Client::new(OAuth2Config::from_settings(&settings.oauth)),
            api_client.clone(),
        ));

        Arc::new(AppState {
            settings,
            inbox: InboxForwardService::new(api_client, token_manager),
        })
    }

    #[tokio::test]
    async fn test_new_email_responds_200_even_with_failing_upstream() {
        let app = Router::new()
            .route("/new-email", post(handle_new_email))
            .with_state(state_with_dead_upstream());

        let payload = json!({
            "kind": "inbox_forward_created",
            "recording": {
                "bucket": { "id": 42 },
                "subscription_url": "http://127.0.0.1:9/999999/buckets/42/recordings/7/subscription.json"
            }
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/new-email")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_new_email_ignores_unknown_kinds() {
        let app = Router::new()
            .route("/new-email", post(handle_new_email))
            .with_state(state_with_dead_upstream());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/new-email")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"kind":"comment_created"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
