//! # Basecamp OAuth2 Authentication Module
//!
//! Módulo isolado para o ciclo de vida do access token do Basecamp.
//!
//! ## Responsabilidades:
//! - Trocar o refresh token por access tokens (launchpad)
//! - Rastrear o expiry absoluto do token corrente
//! - Decidir entre refresh proativo (expiry iminente) e reativo (probe falhou)
//! - Fornecer tokens válidos para as chamadas à API
//!
//! ## Estrutura:
//! - `config.rs`: Credenciais OAuth2
//! - `client.rs`: Cliente HTTP do refresh flow
//! - `token_manager.rs`: Store + validity guard

pub mod client;
pub mod config;
pub mod token_manager;

pub use client::{OAuth2Client, TokenResponse};
pub use config::OAuth2Config;
pub use token_manager::TokenManager;
