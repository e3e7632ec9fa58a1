//! Cliente da API Basecamp 3
//!
//! Este crate fornece uma interface fina para interagir com a API do Basecamp,
//! incluindo:
//!
//! - Requisições autenticadas com merge de headers padrão (Bearer token,
//!   User-Agent, Accept)
//! - Paginação transparente via header `Link` (convenção REST do Basecamp)
//! - Erros estruturados preservando o corpo da resposta da API
//!
//! # Autenticação
//!
//! O token OAuth2 NÃO é armazenado pelo cliente: cada chamada recebe o token
//! corrente como parâmetro. O ciclo de vida do token (refresh, validade) é
//! responsabilidade do chamador — no middleware, o `TokenManager`.
//!
//! # Exemplo Básico
//!
//! ```rust,ignore
//! use basecamp::BasecampClient;
//!
//! #[tokio::main]
//! async fn main() -> basecamp::Result<()> {
//!     let account = std::env::var("BASECAMP_ACCOUNT")
//!         .expect("BASECAMP_ACCOUNT não configurado");
//!     let client = BasecampClient::new(account, "Inbox Relay (ops@example.com)")?;
//!
//!     let profile: serde_json::Value = client
//!         .get_json("/my/profile.json", "some-access-token")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

// Módulos públicos
pub mod client;
pub mod error;
pub mod pagination;

// Re-exports principais
pub use client::{BasecampClient, RequestOptions};
pub use error::{BasecampError, Result};
pub use pagination::parse_next_link;
