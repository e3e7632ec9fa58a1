//! Payload do webhook de inbox forward do Basecamp
//!
//! O Basecamp entrega todo evento de webhook com o mesmo envelope; só o
//! `kind` distingue o que aconteceu. Campos que o relay não usa são
//! simplesmente ignorados no parse.

use serde::Deserialize;

/// Evento entregue em `POST /new-email`
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Tipo do evento; só `inbox_forward_created` dispara processamento
    #[serde(default)]
    pub kind: String,

    /// Recording associado ao evento (ausente em payloads desconhecidos)
    pub recording: Option<Recording>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recording {
    pub bucket: Bucket,

    /// URL absoluta do recurso de subscription da conversa
    pub subscription_url: String,
}

/// Bucket é o termo do Basecamp para projeto/container
#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub id: u64,
}

/// Pessoa retornada por `/projects/{bucket}/people.json` (paginado)
///
/// O processamento só precisa do `id`; o restante fica disponível para log.
#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub id: u64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email_address: Option<String>,
}
