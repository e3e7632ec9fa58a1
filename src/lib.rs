// Biblioteca do relay de inbox do Basecamp
// Expõe módulos para uso em testes e no binário

pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub inbox: services::InboxForwardService,
}
