// src/gateway/backend.rs

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

// Como a requisição se autentica na API remota
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendAuth {
    // Token do cookie StorexAuth
    Bearer(String),
    // Credenciais de serviço vindas do ambiente
    Basic { username: String, password: String },
    Anonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone)]
pub struct BackendRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub auth: BackendAuth,
}

impl BackendRequest {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            auth: BackendAuth::Anonymous,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_auth(mut self, auth: BackendAuth) -> Self {
        self.auth = auth;
        self
    }
}

// O envelope de erro da API remota: { "message": "texto/type:campo" }
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    #[error("API remota respondeu {status}: {message}")]
    Status { status: u16, message: String },

    #[error("API remota inacessível: {0}")]
    Unreachable(String),

    #[error("Resposta inválida da API remota: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A porta para a API remota. Produção usa `HttpGateway`; os testes usam um fake em memória.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    async fn send(&self, request: BackendRequest) -> Result<Value, GatewayError>;
}

pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, GatewayError> {
    serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
}
