//! Cliente HTTP para a API do Basecamp

use crate::error::{BasecampError, Result};
use reqwest::{Client as HttpClient, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

const DEFAULT_BASE_URL: &str = "https://3.basecampapi.com";

/// Opções de uma requisição à API
///
/// As opções do chamador são mescladas com os defaults do cliente
/// (Authorization, User-Agent, Accept): valores do chamador vencem,
/// defaults preenchem apenas as chaves ausentes.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: HashMap<String, String>,
}

impl RequestOptions {
    /// GET simples (método default)
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            query: Vec::new(),
            body: None,
            headers: HashMap::new(),
        }
    }

    /// PUT com corpo JSON
    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Self::get(url)
        }
    }

    /// POST com corpo JSON
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::get(url)
        }
    }

    /// Adiciona um parâmetro de query string
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Define um header explícito (vence sobre os defaults do cliente)
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Cliente para interagir com a API do Basecamp
///
/// URLs relativas são resolvidas contra `https://3.basecampapi.com/<account>`;
/// URLs absolutas (por exemplo as vindas de payloads de webhook ou do header
/// `Link`) passam direto.
#[derive(Clone)]
pub struct BasecampClient {
    http_client: HttpClient,
    base_url: String,
    account_id: String,
    user_agent: String,
}

impl BasecampClient {
    /// Cria um novo cliente Basecamp
    ///
    /// # Argumentos
    ///
    /// * `account_id` - ID numérico da conta Basecamp (prefixo de toda URL da API)
    /// * `user_agent` - User-Agent exigido pela API (nome do app + contato)
    ///
    /// Sem timeout total: uma chamada lenta do upstream segura apenas a
    /// própria task que a emitiu.
    pub fn new(account_id: impl Into<String>, user_agent: impl Into<String>) -> Result<Self> {
        let http_client = HttpClient::builder()
            .build()
            .map_err(|e| BasecampError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
            account_id: account_id.into(),
            user_agent: user_agent.into(),
        })
    }

    /// Substitui a URL base (testes e ambientes de homologação)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve uma URL relativa contra a conta configurada
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}{}", self.base_url, self.account_id, url)
        }
    }

    /// Executa exatamente uma requisição autenticada e retorna a resposta crua
    pub async fn execute(&self, options: RequestOptions, access_token: &str) -> Result<Response> {
        let url = self.absolute_url(&options.url);
        let headers = self.merged_headers(&options, access_token);

        tracing::debug!("{} {}", options.method, url);

        let mut request = self.http_client.request(options.method.clone(), &url);

        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }

        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Executa uma requisição e parseia o corpo como JSON
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        options: RequestOptions,
        access_token: &str,
    ) -> Result<T> {
        let response = self.execute(options, access_token).await?;
        let json = response.json().await?;
        Ok(json)
    }

    /// Executa uma requisição GET e parseia JSON
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, access_token: &str) -> Result<T> {
        self.execute_json(RequestOptions::get(url), access_token).await
    }

    /// Executa uma requisição PUT e parseia JSON
    pub async fn put_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
        body: Value,
    ) -> Result<T> {
        self.execute_json(RequestOptions::put(url, body), access_token).await
    }

    /// Executa uma requisição POST e parseia JSON
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
        body: Value,
    ) -> Result<T> {
        self.execute_json(RequestOptions::post(url, body), access_token).await
    }

    /// Mescla os headers do chamador com os defaults de autenticação
    ///
    /// Semântica de defaults: o valor do chamador vence, o default preenche
    /// apenas a chave ausente.
    fn merged_headers(
        &self,
        options: &RequestOptions,
        access_token: &str,
    ) -> HashMap<String, String> {
        let mut headers = options.headers.clone();

        headers
            .entry("Authorization".to_string())
            .or_insert_with(|| format!("Bearer {}", access_token));
        headers
            .entry("User-Agent".to_string())
            .or_insert_with(|| self.user_agent.clone());
        headers
            .entry("Accept".to_string())
            .or_insert_with(|| "*/*".to_string());

        headers
    }

    /// Processa a resposta HTTP e trata erros
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let status_code = status.as_u16();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Basecamp API error ({}): {}", status_code, body);

            Err(BasecampError::ApiError {
                status: status_code,
                body,
            })
        }
    }

    /// Obtém a conta configurada
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Obtém a URL base
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
