// src/services/client_state.rs

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::models::principal::Principal;

// O cookie com o token de acesso
pub const AUTH_COOKIE: &str = "StorexAuth";

// Espelhos no localStorage do navegador
pub const USER_DATA_KEY: &str = "userData";
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

const MIRROR_KEYS: [&str; 3] = [USER_DATA_KEY, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieEffect {
    Set(String),
    Clear,
}

// O que a interface deve gravar/apagar no localStorage
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StorageDelta {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub set: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
}

/// Efeitos no estado do navegador produzidos por uma operação de sessão.
///
/// O cookie vira cabeçalho `Set-Cookie`; o delta do storage vai no corpo JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientEffects {
    pub cookie: Option<CookieEffect>,
    pub storage: StorageDelta,
}

impl ClientEffects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn sign_in(access_token: &str, refresh_token: Option<&str>, principal: &Principal) -> Self {
        let mut storage = StorageDelta::default();
        storage.set.insert(
            USER_DATA_KEY.to_string(),
            serde_json::to_value(principal).unwrap_or(Value::Null),
        );
        storage
            .set
            .insert(ACCESS_TOKEN_KEY.to_string(), Value::String(access_token.to_string()));
        match refresh_token {
            Some(refresh) => {
                storage
                    .set
                    .insert(REFRESH_TOKEN_KEY.to_string(), Value::String(refresh.to_string()));
            }
            None => storage.remove.push(REFRESH_TOKEN_KEY.to_string()),
        }

        Self {
            cookie: Some(CookieEffect::Set(access_token.to_string())),
            storage,
        }
    }

    // O principal mudou (ex.: loja recém-cadastrada): só o espelho `userData`
    pub fn refresh_user(principal: &Principal) -> Self {
        let mut storage = StorageDelta::default();
        storage.set.insert(
            USER_DATA_KEY.to_string(),
            serde_json::to_value(principal).unwrap_or(Value::Null),
        );
        Self { cookie: None, storage }
    }

    // Só os espelhos: o cookie continua onde está
    pub fn clear_mirrors() -> Self {
        Self {
            cookie: None,
            storage: StorageDelta {
                set: BTreeMap::new(),
                remove: MIRROR_KEYS.iter().map(|key| key.to_string()).collect(),
            },
        }
    }

    pub fn sign_out() -> Self {
        Self {
            cookie: Some(CookieEffect::Clear),
            ..Self::clear_mirrors()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cookie.is_none() && self.storage == StorageDelta::default()
    }
}

// O estado persistido do lado do navegador, como o console o enxerga
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    pub cookie: Option<String>,
    pub storage: BTreeMap<String, Value>,
}

impl ClientState {
    pub fn from_cookie(cookie: Option<String>) -> Self {
        Self {
            cookie: cookie.filter(|token| !token.trim().is_empty()),
            storage: BTreeMap::new(),
        }
    }

    pub fn apply(&mut self, effects: &ClientEffects) {
        match &effects.cookie {
            Some(CookieEffect::Set(token)) => self.cookie = Some(token.clone()),
            Some(CookieEffect::Clear) => self.cookie = None,
            None => {}
        }
        for key in &effects.storage.remove {
            self.storage.remove(key);
        }
        for (key, value) in &effects.storage.set {
            self.storage.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::principal::Role;

    #[test]
    fn sign_out_clears_the_cookie_and_all_mirrors() {
        let principal = Principal {
            id: "u1".into(),
            full_name: "Ana".into(),
            email: "ana@storex.com".into(),
            role: Role::StoreAdmin,
            store: Some("s1".into()),
            sub_stores: vec![],
            categories: vec![],
        };

        let mut client = ClientState::default();
        client.apply(&ClientEffects::sign_in("tok", Some("ref"), &principal));
        assert_eq!(client.cookie.as_deref(), Some("tok"));
        assert_eq!(client.storage.len(), 3);

        client.apply(&ClientEffects::sign_out());
        assert_eq!(client, ClientState::default());
    }

    #[test]
    fn blank_cookie_counts_as_absent() {
        assert_eq!(ClientState::from_cookie(Some("  ".into())).cookie, None);
        assert!(ClientEffects::none().is_empty());
        assert!(!ClientEffects::clear_mirrors().is_empty());
    }
}
