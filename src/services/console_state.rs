// src/services/console_state.rs

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, RwLock};

use crate::{
    gateway::BackendAuth,
    models::principal::Principal,
    services::{
        entity_store::EntityStore,
        resources::{
            CategoriesResource, ProductsResource, StoreUsersResource, StoresResource,
            SubStoresResource, UsersResource,
        },
    },
};

// ---
// ConsoleState (todos os stores de uma sessão)
// ---
pub struct ConsoleState {
    pub principal: Principal,
    pub users: EntityStore<UsersResource>,
    pub store_users: EntityStore<StoreUsersResource>,
    pub stores: EntityStore<StoresResource>,
    pub sub_stores: EntityStore<SubStoresResource>,
    pub categories: EntityStore<CategoriesResource>,
    pub products: EntityStore<ProductsResource>,
}

impl ConsoleState {
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            users: EntityStore::new(),
            store_users: EntityStore::new(),
            stores: EntityStore::new(),
            sub_stores: EntityStore::new(),
            categories: EntityStore::new(),
            products: EntityStore::new(),
        }
    }
}

pub type SharedState = Arc<Mutex<ConsoleState>>;

// Uma sessão autenticada, como chega aos handlers
#[derive(Clone)]
pub struct ConsoleSession {
    pub token: String,
    pub principal: Principal,
    pub state: SharedState,
}

impl ConsoleSession {
    pub fn auth(&self) -> BackendAuth {
        BackendAuth::Bearer(self.token.clone())
    }
}

/// Os estados de console vivos, indexados pelo token do cookie StorexAuth.
///
/// As operações de uma mesma sessão passam pelo `Mutex` do seu estado e por
/// isso são serializadas; sessões diferentes andam em paralelo.
#[derive(Clone, Default)]
pub struct ConsoleRegistry {
    sessions: Arc<RwLock<HashMap<String, SharedState>>>,
}

impl ConsoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, token: &str) -> Option<ConsoleSession> {
        let state = self.sessions.read().await.get(token).cloned()?;
        let principal = state.lock().await.principal.clone();
        Some(ConsoleSession {
            token: token.to_string(),
            principal,
            state,
        })
    }

    // Um principal novo descarta os stores antigos daquele token
    pub async fn insert(&self, token: &str, principal: Principal) -> ConsoleSession {
        let state = Arc::new(Mutex::new(ConsoleState::new(principal.clone())));
        self.sessions
            .write()
            .await
            .insert(token.to_string(), state.clone());
        tracing::debug!(user = %principal.id, "estado de console criado");
        ConsoleSession {
            token: token.to_string(),
            principal,
            state,
        }
    }

    // Mesmo principal de antes: reaproveita os stores em cache
    pub async fn upsert(&self, token: &str, principal: Principal) -> ConsoleSession {
        match self.get(token).await {
            Some(session) if session.principal == principal => session,
            _ => self.insert(token, principal).await,
        }
    }

    pub async fn evict(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token).is_some();
        if removed {
            tracing::debug!("estado de console descartado");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::principal::Role;

    fn principal() -> Principal {
        Principal {
            id: "u1".into(),
            full_name: "Ana".into(),
            email: "ana@storex.com".into(),
            role: Role::StoreAdmin,
            store: Some("s1".into()),
            sub_stores: vec![],
            categories: vec![],
        }
    }

    #[tokio::test]
    async fn sessions_are_keyed_by_token() {
        let registry = ConsoleRegistry::new();
        assert!(registry.get("t1").await.is_none());

        let session = registry.insert("t1", principal()).await;
        assert_eq!(session.auth(), BackendAuth::Bearer("t1".into()));

        let again = registry.get("t1").await.unwrap();
        assert!(Arc::ptr_eq(&session.state, &again.state));
        assert_eq!(again.principal.id, "u1");

        assert!(registry.evict("t1").await);
        assert!(!registry.evict("t1").await);
        assert!(registry.get("t1").await.is_none());
    }
}
