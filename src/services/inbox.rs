//! Processamento do webhook de inbox forward
//!
//! Fluxo linear: filtrar o kind, garantir token válido, buscar todas as
//! pessoas do bucket (paginado), substituir a lista de subscribers da
//! conversa e postar o comentário automático.

use std::sync::Arc;

use serde_json::{json, Value};

use basecamp::BasecampClient;

use crate::auth::TokenManager;
use crate::models::{Person, WebhookEvent};
use crate::utils::{AppError, AppResult};

/// Único kind de evento que dispara processamento
pub const INBOX_FORWARD_CREATED: &str = "inbox_forward_created";

/// Conteúdo fixo do comentário automático
const COMMENT_CONTENT: &str = "Someone sent this email.";

/// Resultado tipado de um processamento
///
/// Logado estruturalmente no boundary de contenção; o contrato externo
/// (webhook sempre recebe 200) não muda.
#[derive(Debug)]
pub enum ProcessingOutcome {
    /// Evento de outro kind: no-op bem-sucedido
    Ignored { kind: String },

    /// Subscribers substituídos e comentário postado
    Completed { bucket: u64, subscribed: usize },
}

/// Orquestra o processamento de um evento de inbox forward
#[derive(Clone)]
pub struct InboxForwardService {
    client: BasecampClient,
    token_manager: Arc<TokenManager>,
}

impl InboxForwardService {
    pub fn new(client: BasecampClient, token_manager: Arc<TokenManager>) -> Self {
        Self {
            client,
            token_manager,
        }
    }

    /// Processa um payload cru de webhook
    ///
    /// Payloads de shape desconhecido viram `Ignored` quando o kind não
    /// bate; problemas de shape num evento relevante viram erro e ficam
    /// contidos no boundary do handler.
    pub async fn process_payload(&self, payload: Value) -> AppResult<ProcessingOutcome> {
        let event: WebhookEvent = serde_json::from_value(payload)?;
        self.process_event(event).await
    }

    pub async fn process_event(&self, event: WebhookEvent) -> AppResult<ProcessingOutcome> {
        if event.kind != INBOX_FORWARD_CREATED {
            return Ok(ProcessingOutcome::Ignored { kind: event.kind });
        }

        let access_token = self.token_manager.get_valid_token().await?;

        let recording = event.recording.ok_or_else(|| {
            AppError::ValidationError("inbox_forward_created event without recording".to_string())
        })?;

        let bucket = recording.bucket.id;
        let subscription_url = recording.subscription_url;
        // Mesma derivação textual do integration original: substituição
        // literal da primeira ocorrência, não manipulação de path
        let comment_url = subscription_url.replacen("subscription", "comments", 1);

        let people_in_bucket = self
            .client
            .get_paginated(
                &format!("/projects/{}/people.json", bucket),
                &access_token,
                |person: Person| person.id,
            )
            .await?;

        let subscribed = people_in_bucket.len();

        // Substituição integral da lista de subscribers, não append
        let _: Value = self
            .client
            .put_json(
                &subscription_url,
                &access_token,
                json!({ "subscriptions": people_in_bucket }),
            )
            .await?;

        let _: Value = self
            .client
            .post_json(&comment_url, &access_token, json!({ "content": COMMENT_CONTENT }))
            .await?;

        Ok(ProcessingOutcome::Completed { bucket, subscribed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{OAuth2Client, OAuth2Config};
    use httpmock::prelude::*;

    fn service_for(server: &MockServer) -> InboxForwardService {
        let config = OAuth2Config {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            redirect_uri: "https://example.com/callback".to_string(),
            refresh_token: "test-refresh".to_string(),
            token_url: format!("{}/authorization/token", server.base_url()),
        };

        let api_client = BasecampClient::new("999999", "Inbox Relay (test)")
            .unwrap()
            .with_base_url(server.base_url());

        let token_manager = Arc::new(TokenManager::new(
            OAuth2Client::new(config),
            api_client.clone(),
        ));

        InboxForwardService::new(api_client, token_manager)
    }

    fn inbox_forward_event(server: &MockServer) -> Value {
        json!({
            "kind": "inbox_forward_created",
            "recording": {
                "bucket": { "id": 42 },
                "subscription_url": format!(
                    "{}/999999/buckets/42/recordings/7/subscription.json",
                    server.base_url()
                )
            }
        })
    }

    #[tokio::test]
    async fn test_other_kinds_produce_zero_outbound_calls() {
        let server = MockServer::start_async().await;

        let refresh_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/authorization/token");
                then.status(200)
                    .json_body(json!({ "access_token": "tok", "expires_in": 1209600 }));
            })
            .await;

        let service = service_for(&server);
        let outcome = service
            .process_payload(json!({ "kind": "comment_created" }))
            .await
            .unwrap();

        assert!(matches!(outcome, ProcessingOutcome::Ignored { ref kind } if kind == "comment_created"));
        refresh_mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_inbox_forward_subscribes_everyone_and_comments() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/authorization/token");
                then.status(200)
                    .json_body(json!({ "access_token": "tok", "expires_in": 1209600 }));
            })
            .await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/999999/projects/42/people.json");
                then.status(200)
                    .json_body(json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }]));
            })
            .await;

        let put_mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/999999/buckets/42/recordings/7/subscription.json")
                    .json_body(json!({ "subscriptions": [1, 2, 3] }));
                then.status(200).json_body(json!({ "count": 3 }));
            })
            .await;

        let post_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/999999/buckets/42/recordings/7/comments.json")
                    .json_body(json!({ "content": "Someone sent this email." }));
                then.status(201).json_body(json!({ "id": 99 }));
            })
            .await;

        let service = service_for(&server);
        let outcome = service
            .process_payload(inbox_forward_event(&server))
            .await
            .unwrap();

        match outcome {
            ProcessingOutcome::Completed { bucket, subscribed } => {
                assert_eq!(bucket, 42);
                assert_eq!(subscribed, 3);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        put_mock.assert_hits_async(1).await;
        post_mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_people_fetch_failure_aborts_without_writes() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/authorization/token");
                then.status(200)
                    .json_body(json!({ "access_token": "tok", "expires_in": 1209600 }));
            })
            .await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/999999/projects/42/people.json");
                then.status(404).body(r#"{"error":"no such project"}"#);
            })
            .await;

        let put_mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/999999/buckets/42/recordings/7/subscription.json");
                then.status(200).json_body(json!({}));
            })
            .await;

        let service = service_for(&server);
        let err = service
            .process_payload(inbox_forward_event(&server))
            .await
            .unwrap_err();

        assert_eq!(err.upstream_body(), Some(r#"{"error":"no such project"}"#));
        put_mock.assert_hits_async(0).await;
    }
}
