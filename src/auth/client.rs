//! OAuth2 HTTP Client
//!
//! Cliente HTTP isolado para o refresh-token flow do launchpad.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::OAuth2Config;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

/// Resposta do endpoint de troca de token
#[derive(Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,

    /// Tempo de vida do token em segundos
    pub expires_in: u64,
}

/// Cliente OAuth2 para o launchpad do Basecamp
pub struct OAuth2Client {
    config: OAuth2Config,
    http_client: Client,
}

impl OAuth2Client {
    /// Criar novo cliente OAuth2
    pub fn new(config: OAuth2Config) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    /// Trocar o refresh token por um novo access token
    ///
    /// # Retorno
    /// - `Ok(TokenResponse)`: Novo token e tempo de vida
    /// - `Err(AppError)`: Falha de rede ou rejeição do launchpad (sem retry)
    pub async fn refresh_access_token(&self) -> AppResult<TokenResponse> {
        log_info("🔐 [OAuth2] Renovando access token via refresh token...");

        let response = self
            .http_client
            .post(&self.config.token_url)
            .query(&[
                ("type", "refresh"),
                ("refresh_token", self.config.refresh_token.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            log_error(&format!("❌ [OAuth2] Token refresh failed: {} - {}", status, body));
            return Err(AppError::OAuthApi {
                status: status.as_u16(),
                body,
            });
        }

        let token_response: TokenResponse = response.json().await?;

        log_info(&format!(
            "✅ [OAuth2] Access token renovado (expira em {}s)",
            token_response.expires_in
        ));

        Ok(token_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_config(token_url: String) -> OAuth2Config {
        OAuth2Config {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            redirect_uri: "https://example.com/callback".to_string(),
            refresh_token: "test-refresh".to_string(),
            token_url,
        }
    }

    #[tokio::test]
    async fn test_refresh_sends_expected_query_params() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/authorization/token")
                    .query_param("type", "refresh")
                    .query_param("refresh_token", "test-refresh")
                    .query_param("client_id", "test-client")
                    .query_param("client_secret", "test-secret")
                    .query_param("redirect_uri", "https://example.com/callback");
                then.status(200)
                    .json_body(json!({ "access_token": "new-token", "expires_in": 1209600 }));
            })
            .await;

        let client = OAuth2Client::new(test_config(format!(
            "{}/authorization/token",
            server.base_url()
        )));

        let token = client.refresh_access_token().await.unwrap();

        mock.assert_async().await;
        assert_eq!(token.access_token, "new-token");
        assert_eq!(token.expires_in, 1209600);
    }

    #[tokio::test]
    async fn test_refresh_failure_carries_response_body() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/authorization/token");
                then.status(400).body(r#"{"error":"invalid refresh token"}"#);
            })
            .await;

        let client = OAuth2Client::new(test_config(format!(
            "{}/authorization/token",
            server.base_url()
        )));

        let err = client.refresh_access_token().await.unwrap_err();

        match &err {
            AppError::OAuthApi { status, body } => {
                assert_eq!(*status, 400);
                assert_eq!(body, r#"{"error":"invalid refresh token"}"#);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.upstream_body(), Some(r#"{"error":"invalid refresh token"}"#));
    }
}
