// src/config.rs

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Context};

use crate::{
    common::i18n::I18nStore,
    gateway::{BackendAuth, BackendGateway, HttpGateway},
    services::{
        console_service::ConsoleService, console_state::ConsoleRegistry, password::PasswordHasher,
        session_service::SessionService,
    },
};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_PASSWORD_COST: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ---
// Settings (o que vem do ambiente)
// ---
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: SocketAddr,
    pub api_base_url: String,
    pub service_auth: BackendAuth,
    pub password_salt: Option<[u8; 16]>,
    pub password_cost: u32,
    pub request_timeout: Duration,
    pub cookie_secure: bool,
}

fn parse_salt(raw: &str) -> anyhow::Result<[u8; 16]> {
    let raw = raw.trim();
    if raw.len() != 32 || !raw.is_ascii() {
        bail!("PASSWORD_SALT deve ter 32 caracteres hexadecimais");
    }
    let mut salt = [0u8; 16];
    for (i, byte) in salt.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&raw[i * 2..i * 2 + 2], 16)
            .with_context(|| format!("PASSWORD_SALT inválido na posição {}", i * 2))?;
    }
    Ok(salt)
}

fn parse_bool(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("{key} inválido: {other}")),
    }
}

impl Settings {
    /// Lê as configurações de qualquer fonte chave → valor.
    ///
    /// Os testes passam um `HashMap`; a aplicação passa `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_address = get("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .parse()
            .context("BIND_ADDRESS inválido")?;

        let api_base_url = get("API_BASE_URL").context("API_BASE_URL deve ser definida")?;
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            bail!("API_BASE_URL deve começar com http:// ou https://");
        }

        let service_auth = match (get("API_SERVICE_USER"), get("API_SERVICE_PASSWORD")) {
            (Some(username), Some(password)) => BackendAuth::Basic { username, password },
            (None, None) => BackendAuth::Anonymous,
            _ => bail!("API_SERVICE_USER e API_SERVICE_PASSWORD devem ser definidas juntas"),
        };

        let password_salt = get("PASSWORD_SALT").map(|raw| parse_salt(&raw)).transpose()?;

        let password_cost = match get("PASSWORD_COST") {
            Some(raw) => raw.trim().parse().context("PASSWORD_COST inválido")?,
            None => DEFAULT_PASSWORD_COST,
        };
        if !(4..=31).contains(&password_cost) {
            bail!("PASSWORD_COST deve estar entre 4 e 31");
        }

        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().context("REQUEST_TIMEOUT_SECS inválido")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool("COOKIE_SECURE", &raw)?,
            None => true,
        };

        Ok(Self {
            bind_address,
            api_base_url,
            service_auth,
            password_salt,
            password_cost,
            request_timeout: Duration::from_secs(timeout_secs),
            cookie_secure,
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

// ---
// AppState (o estado compartilhado por todos os handlers)
// ---
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub console_service: ConsoleService,
    pub session_service: SessionService,
    pub password_hasher: PasswordHasher,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Settings::from_env()?;
        let gateway = HttpGateway::new(&settings.api_base_url, settings.request_timeout)
            .context("Falha ao criar o cliente HTTP da API remota")?;

        tracing::info!(api = %settings.api_base_url, "✅ Cliente da API remota configurado");

        Ok(Self::with_gateway(settings, Arc::new(gateway)))
    }

    // Monta o gráfico de dependências em volta de um gateway qualquer
    pub fn with_gateway(settings: Settings, gateway: Arc<dyn BackendGateway>) -> Self {
        let registry = ConsoleRegistry::new();
        let password_hasher = PasswordHasher::new(settings.password_salt, settings.password_cost);
        if password_hasher.is_enabled() {
            tracing::info!(cost = settings.password_cost, "pré-hash de senhas ativo");
        }

        let console_service = ConsoleService::new(gateway.clone(), registry.clone());
        let session_service = SessionService::new(
            gateway,
            registry,
            settings.service_auth.clone(),
            password_hasher.clone(),
        );

        Self {
            settings: Arc::new(settings),
            console_service,
            session_service,
            password_hasher,
            i18n_store: Arc::new(I18nStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_the_api_url_is_set() {
        let settings = settings(&[("API_BASE_URL", "https://api.storex.test")]).unwrap();
        assert_eq!(settings.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.service_auth, BackendAuth::Anonymous);
        assert_eq!(settings.password_salt, None);
        assert_eq!(settings.password_cost, 10);
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
        assert!(settings.cookie_secure);
    }

    #[test]
    fn api_url_is_required() {
        let err = settings(&[]).unwrap_err();
        assert!(err.to_string().contains("API_BASE_URL"));
        assert!(settings(&[("API_BASE_URL", "api.storex.test")]).is_err());
    }

    #[test]
    fn service_credentials_come_in_pairs() {
        let basic = settings(&[
            ("API_BASE_URL", "http://localhost:4000"),
            ("API_SERVICE_USER", "console"),
            ("API_SERVICE_PASSWORD", "secret"),
        ])
        .unwrap();
        assert!(matches!(basic.service_auth, BackendAuth::Basic { .. }));

        assert!(settings(&[("API_BASE_URL", "http://localhost:4000"), ("API_SERVICE_USER", "console")]).is_err());
    }

    #[test]
    fn salt_must_be_sixteen_hex_bytes() {
        let ok = settings(&[
            ("API_BASE_URL", "http://localhost:4000"),
            ("PASSWORD_SALT", "000102030405060708090a0b0c0d0e0f"),
            ("COOKIE_SECURE", "false"),
        ])
        .unwrap();
        assert_eq!(ok.password_salt.unwrap()[15], 0x0f);
        assert!(!ok.cookie_secure);

        assert!(settings(&[("API_BASE_URL", "http://localhost:4000"), ("PASSWORD_SALT", "abc")]).is_err());
        assert!(settings(&[
            ("API_BASE_URL", "http://localhost:4000"),
            ("PASSWORD_SALT", "zz0102030405060708090a0b0c0d0e0f"),
        ])
        .is_err());
    }
}
