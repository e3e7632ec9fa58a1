use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub basecamp: BasecampSettings,
    pub oauth: OAuthSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BasecampSettings {
    /// ID numérico da conta (prefixo de toda URL da API)
    pub account_id: String,
    /// User-Agent exigido pela API do Basecamp (app + contato)
    pub user_agent: String,
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Refresh token de longa duração obtido na autorização inicial
    pub refresh_token: String,
    pub token_url: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        // Variáveis de ambiente com nomes legados (mesmos do deploy original)
        if let Ok(account) = std::env::var("BASECAMP_ACCOUNT") {
            builder = builder.set_override("basecamp.account_id", account)?;
        }
        if let Ok(user_agent) = std::env::var("USER_AGENT") {
            builder = builder.set_override("basecamp.user_agent", user_agent)?;
        }
        if let Ok(client_id) = std::env::var("CLIENT_ID") {
            builder = builder.set_override("oauth.client_id", client_id)?;
        }
        if let Ok(client_secret) = std::env::var("CLIENT_SECRET") {
            builder = builder.set_override("oauth.client_secret", client_secret)?;
        }
        if let Ok(redirect_uri) = std::env::var("REDIRECT_URI") {
            builder = builder.set_override("oauth.redirect_uri", redirect_uri)?;
        }
        if let Ok(refresh_token) = std::env::var("REFRESH_TOKEN") {
            builder = builder.set_override("oauth.refresh_token", refresh_token)?;
        }

        // Prefixo próprio para overrides pontuais (RELAY_SERVER__PORT etc.)
        builder = builder.add_source(Environment::with_prefix("RELAY").separator("__"));

        let s = builder.build()?;

        s.try_deserialize()
    }
}
