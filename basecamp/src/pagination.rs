//! Paginação via header `Link`
//!
//! A API do Basecamp pagina coleções anunciando a próxima página no header
//! `Link` da resposta (`<https://...&page=2>; rel="next"`). A página final
//! simplesmente omite o header.

use crate::client::{BasecampClient, RequestOptions};
use crate::error::Result;
use serde::de::DeserializeOwned;

/// Extrai a URL da próxima página de um header `Link`
///
/// Retorna a URL entre o primeiro `<` e `>`, ou `None` quando o header está
/// ausente, vazio ou malformado. Assume um único link por header: com
/// múltiplas relations, vence a primeira URL.
pub fn parse_next_link(header: Option<&str>) -> Option<String> {
    let raw = header?.trim();
    let start = raw.find('<')?;
    let rest = &raw[start + 1..];
    let end = rest.find('>')?;
    let url = &rest[..end];

    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

impl BasecampClient {
    /// Executa um GET paginado, seguindo o header `Link` até esgotar
    ///
    /// Cada item de cada página é transformado por `parse_item`; o resultado
    /// é a concatenação de todas as páginas, na ordem original. Qualquer
    /// falha de página aborta a paginação inteira — nunca há resultado
    /// parcial.
    pub async fn get_paginated<T, R, F>(
        &self,
        url: &str,
        access_token: &str,
        parse_item: F,
    ) -> Result<Vec<R>>
    where
        T: DeserializeOwned,
        F: Fn(T) -> R,
    {
        let mut next_url = Some(self.absolute_url(url));
        let mut whole_data = Vec::new();

        while let Some(url) = next_url {
            let response = self.execute(RequestOptions::get(url), access_token).await?;

            // O header precisa ser lido antes de consumir o corpo
            let link = response
                .headers()
                .get("link")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            let page: Vec<T> = response.json().await?;
            whole_data.extend(page.into_iter().map(&parse_item));

            next_url = parse_next_link(link.as_deref());
        }

        Ok(whole_data)
    }
}
