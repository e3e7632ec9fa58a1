//! OAuth2 Configuration
//!
//! Centraliza as credenciais necessárias para o refresh-token flow do
//! launchpad (37signals).

use crate::config::settings::OAuthSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Config {
    /// Client ID registrado no launchpad
    pub client_id: String,

    /// Client Secret registrado no launchpad
    pub client_secret: String,

    /// URL de callback registrada na integração
    pub redirect_uri: String,

    /// Refresh token de longa duração (obtido uma única vez, fora do relay)
    pub refresh_token: String,

    /// Endpoint de troca de tokens
    pub token_url: String,
}

impl OAuth2Config {
    /// Cria a configuração a partir das settings carregadas
    pub fn from_settings(settings: &OAuthSettings) -> Self {
        Self {
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            redirect_uri: settings.redirect_uri.clone(),
            refresh_token: settings.refresh_token.clone(),
            token_url: settings.token_url.clone(),
        }
    }
}
