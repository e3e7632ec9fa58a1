//! Token Manager
//!
//! Ciclo de vida do access token: armazenamento em memória, refresh proativo
//! perto do expiry e refresh reativo quando o probe de validade falha.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use basecamp::BasecampClient;

use super::OAuth2Client;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

/// Janela antes do expiry em que o refresh passa a ser proativo
const REFRESH_MARGIN: Duration = Duration::from_secs(10 * 60);

/// Chamada leve usada como probe de validade do token
const PROFILE_PROBE_PATH: &str = "/my/profile.json";

/// Estado do token em memória
///
/// Não sobrevive a restart do processo. Sem guard de concorrência além do
/// RwLock: refreshes concorrentes podem se sobrepor e o último vence, o que
/// é aceitável porque tokens são substituíveis de forma idempotente.
#[derive(Debug, Clone)]
struct TokenState {
    value: Option<String>,
    expires_at: Option<Instant>,
}

impl TokenState {
    fn new() -> Self {
        Self {
            value: None,
            expires_at: None,
        }
    }

    /// Tempo restante de vida, ou `None` quando não há token
    fn remaining(&self) -> Option<Duration> {
        match (&self.value, self.expires_at) {
            (Some(_), Some(expires_at)) => {
                Some(expires_at.saturating_duration_since(Instant::now()))
            }
            _ => None,
        }
    }

    fn set(&mut self, value: String, expires_in: Duration) {
        self.value = Some(value);
        self.expires_at = Some(Instant::now() + expires_in);
    }
}

/// Gerenciador do access token OAuth2
///
/// Instância única por processo, injetada em quem emite chamadas à API
/// (nada de estado global).
pub struct TokenManager {
    oauth_client: OAuth2Client,
    api_client: BasecampClient,
    state: Arc<RwLock<TokenState>>,
}

impl TokenManager {
    pub fn new(oauth_client: OAuth2Client, api_client: BasecampClient) -> Self {
        Self {
            oauth_client,
            api_client,
            state: Arc::new(RwLock::new(TokenState::new())),
        }
    }

    /// Garante um token provavelmente válido e o retorna
    pub async fn get_valid_token(&self) -> AppResult<String> {
        self.ensure_valid().await?;

        let state = self.state.read().await;
        state
            .value
            .clone()
            .ok_or_else(|| AppError::InternalError("No access token available after refresh".to_string()))
    }

    /// Decide entre refresh proativo, probe reativo ou nada
    ///
    /// - Sem token, ou restando ≤ 10 minutos: refresh direto.
    /// - Caso contrário: probe no perfil do próprio usuário; qualquer falha
    ///   do probe dispara o refresh (tokens revogados externamente).
    ///
    /// Não há garantia dura de validade — a janela entre o check e o uso é
    /// aceita.
    pub async fn ensure_valid(&self) -> AppResult<()> {
        let trusted_token = {
            let state = self.state.read().await;
            match (&state.value, state.remaining()) {
                (Some(value), Some(remaining)) if remaining > REFRESH_MARGIN => Some(value.clone()),
                _ => None,
            }
        };

        let token = match trusted_token {
            Some(token) => token,
            None => {
                log_info("🔄 [TokenManager] Token ausente ou perto do expiry, renovando...");
                return self.force_refresh().await;
            }
        };

        match self
            .api_client
            .get_json::<serde_json::Value>(PROFILE_PROBE_PATH, &token)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                log_warning(&format!(
                    "⚠️ [TokenManager] Probe de validade falhou ({}), renovando token...",
                    e
                ));
                self.force_refresh().await
            }
        }
    }

    /// Executa o refresh e sobrescreve o estado do token
    ///
    /// Falha do launchpad propaga ao chamador sem recuperação local.
    pub async fn force_refresh(&self) -> AppResult<()> {
        let response = self.oauth_client.refresh_access_token().await?;

        let mut state = self.state.write().await;
        state.set(
            response.access_token,
            Duration::from_secs(response.expires_in),
        );

        Ok(())
    }

    #[cfg(test)]
    async fn seed(&self, value: &str, expires_in: Duration) {
        let mut state = self.state.write().await;
        state.set(value.to_string(), expires_in);
    }
}
