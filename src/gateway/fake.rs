// src/gateway/fake.rs

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::gateway::backend::{BackendGateway, BackendRequest, GatewayError};

// API remota em memória: grava cada requisição e devolve as respostas na ordem programada.
// Sem resposta programada, devolve uma lista vazia.
#[derive(Default)]
pub struct FakeGateway {
    replies: Mutex<VecDeque<Result<Value, GatewayError>>>,
    calls: Mutex<Vec<BackendRequest>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, value: Value) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(value));
        self
    }

    pub fn fail(&self, status: u16, message: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Err(GatewayError::Status {
            status,
            message: message.to_string(),
        }));
        self
    }

    pub fn unreachable(&self) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(GatewayError::Unreachable("connection refused".into())));
        self
    }

    pub fn calls(&self) -> Vec<BackendRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> BackendRequest {
        self.calls().pop().expect("nenhuma chamada registrada")
    }
}

#[async_trait]
impl BackendGateway for FakeGateway {
    async fn send(&self, request: BackendRequest) -> Result<Value, GatewayError> {
        self.calls.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!([])))
    }
}
