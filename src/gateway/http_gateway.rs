// src/gateway/http_gateway.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::gateway::backend::{
    BackendAuth, BackendGateway, BackendRequest, ErrorEnvelope, GatewayError, HttpMethod,
};

/// Cliente HTTP da API remota (JSON sobre HTTPS).
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(3))
            .build()
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn send(&self, request: BackendRequest) -> Result<Value, GatewayError> {
        let url = self.url(&request.path);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder = match &request.auth {
            BackendAuth::Bearer(token) => builder.bearer_auth(token),
            BackendAuth::Basic { username, password } => builder.basic_auth(username, Some(password)),
            BackendAuth::Anonymous => builder,
        };

        tracing::debug!(method = ?request.method, path = %request.path, "→ API remota");

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                GatewayError::Unreachable(format!("Sem conexão com {}", self.base_url))
            } else {
                GatewayError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        if status.is_success() {
            if bytes.is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()));
        }

        // Sem envelope { message }, cai no texto padrão do status
        let message = serde_json::from_slice::<ErrorEnvelope>(&bytes)
            .map(|envelope| envelope.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Erro desconhecido").to_string());

        tracing::debug!(status = status.as_u16(), %message, "← API remota falhou");

        Err(GatewayError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let gateway = HttpGateway::new("https://api.storex.test/", Duration::from_secs(1)).unwrap();
        assert_eq!(gateway.url("/api/stores"), "https://api.storex.test/api/stores");
    }
}
