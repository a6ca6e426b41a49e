// src/services/session_service.rs

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::dangerous::insecure_decode;
use serde_json::json;

use crate::{
    common::error::{AppError, StoreError},
    gateway::{backend, BackendAuth, BackendGateway, BackendRequest, GatewayError},
    models::{
        auth::{AuthEnvelope, Claims, LoginUserPayload, MeEnvelope, RegisterRequest, RegisterUserPayload},
        principal::{Principal, Role},
        store::StorePayload,
    },
    policy::{
        guard::{HOME_ROUTE, LOGIN_ROUTE, STORE_REGISTRATION_ROUTE},
        missing_store_redirect, Action, Section,
    },
    services::{
        client_state::{ClientEffects, ClientState},
        console_state::{ConsoleRegistry, ConsoleSession},
        password::PasswordHasher,
    },
};

// Resultado de login/registro/logout/initialize
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub principal: Option<Principal>,
    pub redirect: Option<String>,
    pub effects: ClientEffects,
}

impl SessionOutcome {
    fn anonymous(effects: ClientEffects) -> Self {
        Self {
            principal: None,
            redirect: None,
            effects,
        }
    }
}

// Token JWT com `exp` no passado conta como ausente. Token opaco (não-JWT) segue adiante.
// A assinatura não é conferida aqui: quem valida o token é a API remota.
pub fn token_expired(token: &str) -> bool {
    match insecure_decode::<Claims>(token) {
        Ok(data) => data.claims.exp.is_some_and(|exp| exp <= Utc::now().timestamp()),
        Err(_) => false,
    }
}

// No login/registro, 401 é credencial errada e não sessão vencida
fn credential_failure(err: GatewayError) -> StoreError {
    match err {
        GatewayError::Status { status, message } => StoreError::from_message(&message, Some(status)),
        other => StoreError::from(other),
    }
}

#[derive(Clone)]
pub struct SessionService {
    gateway: Arc<dyn BackendGateway>,
    registry: ConsoleRegistry,
    service_auth: BackendAuth,
    hasher: PasswordHasher,
}

impl SessionService {
    pub fn new(
        gateway: Arc<dyn BackendGateway>,
        registry: ConsoleRegistry,
        service_auth: BackendAuth,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            gateway,
            registry,
            service_auth,
            hasher,
        }
    }

    pub async fn login(&self, payload: &LoginUserPayload) -> Result<SessionOutcome, AppError> {
        let password = self.hasher.prepare(&payload.password).await?;
        let body = json!({ "email": payload.email, "password": password });

        let request = BackendRequest::post("/jwt/login", body).with_auth(self.service_auth.clone());
        self.authenticate(request).await
    }

    // O registro público sempre cria um store-admin, não importa o que veio no payload
    pub async fn register(&self, payload: &RegisterUserPayload) -> Result<SessionOutcome, AppError> {
        if payload.role.is_some_and(|role| role != Role::StoreAdmin) {
            tracing::debug!(requested = ?payload.role, "cargo do registro ignorado");
        }
        let password = self.hasher.prepare(&payload.password).await?;
        let body = serde_json::to_value(RegisterRequest {
            full_name: &payload.full_name,
            email: &payload.email,
            password: &password,
            role: Role::StoreAdmin,
        })
        .map_err(|e| anyhow::anyhow!("Falha ao montar o registro: {}", e))?;

        let request = BackendRequest::post("/jwt/register", body).with_auth(self.service_auth.clone());
        self.authenticate(request).await
    }

    async fn authenticate(&self, request: BackendRequest) -> Result<SessionOutcome, AppError> {
        let path = request.path.clone();
        let envelope: AuthEnvelope = self
            .gateway
            .send(request)
            .await
            .and_then(backend::decode)
            .map_err(|err| {
                let normalized = credential_failure(err);
                tracing::warn!(%path, kind = ?normalized.kind, "autenticação recusada");
                AppError::Store(normalized)
            })?;

        let principal = envelope.user_data;

        // Conta sem loja: store-admin vai cadastrar a loja; os outros cargos são órfãos
        match missing_store_redirect(&principal) {
            Some(LOGIN_ROUTE) => {
                tracing::warn!(user = %principal.id, role = principal.role.as_str(), "conta sem loja, sessão descartada");
                self.registry.evict(&envelope.access_token).await;
                Ok(SessionOutcome {
                    principal: None,
                    redirect: Some(LOGIN_ROUTE.to_string()),
                    effects: ClientEffects::sign_out(),
                })
            }
            target => {
                self.registry.insert(&envelope.access_token, principal.clone()).await;
                tracing::info!(user = %principal.id, role = principal.role.as_str(), "sessão iniciada");
                Ok(SessionOutcome {
                    effects: ClientEffects::sign_in(
                        &envelope.access_token,
                        envelope.refresh_token.as_deref(),
                        &principal,
                    ),
                    principal: Some(principal),
                    redirect: Some(target.unwrap_or(HOME_ROUTE).to_string()),
                })
            }
        }
    }

    pub async fn logout(&self, client: &ClientState) -> SessionOutcome {
        if let Some(token) = &client.cookie {
            self.registry.evict(token).await;
        }
        tracing::info!("sessão encerrada");
        SessionOutcome {
            principal: None,
            redirect: Some(LOGIN_ROUTE.to_string()),
            effects: ClientEffects::sign_out(),
        }
    }

    /// Carrega o principal a partir do cookie. Nunca falha: qualquer erro vira "sem sessão".
    pub async fn initialize(&self, client: &ClientState) -> SessionOutcome {
        let Some(token) = client.cookie.as_deref() else {
            return SessionOutcome::anonymous(ClientEffects::none());
        };

        if token_expired(token) {
            tracing::debug!("token expirado, sessão tratada como ausente");
            self.registry.evict(token).await;
            return SessionOutcome::anonymous(ClientEffects::sign_out());
        }

        match self.fetch_me(token).await {
            Ok(principal) => {
                let session = self.registry.upsert(token, principal).await;
                SessionOutcome {
                    principal: Some(session.principal),
                    redirect: None,
                    effects: ClientEffects::none(),
                }
            }
            Err(err) => {
                tracing::warn!(%err, "falha ao restaurar a sessão");
                if err.status() == Some(401) {
                    self.registry.evict(token).await;
                    SessionOutcome::anonymous(ClientEffects::sign_out())
                } else {
                    SessionOutcome::anonymous(ClientEffects::clear_mirrors())
                }
            }
        }
    }

    // Usado pelo middleware: cache primeiro, /auth/me só quando o token é novo para o console
    pub async fn restore(&self, token: &str) -> Option<ConsoleSession> {
        if let Some(session) = self.registry.get(token).await {
            return Some(session);
        }
        if token_expired(token) {
            return None;
        }
        match self.fetch_me(token).await {
            // Conta órfã não ganha estado de console
            Ok(principal) if missing_store_redirect(&principal) == Some(LOGIN_ROUTE) => {
                tracing::warn!(user = %principal.id, "conta sem loja recusada");
                None
            }
            Ok(principal) => Some(self.registry.insert(token, principal).await),
            Err(err) => {
                tracing::debug!(%err, "token recusado pela API remota");
                None
            }
        }
    }

    /// Cadastro da primeira loja de um store-admin recém-registrado.
    ///
    /// Depois do POST, o principal é recarregado de /auth/me para já trazer a loja.
    pub async fn register_store(
        &self,
        session: &ConsoleSession,
        payload: &StorePayload,
    ) -> Result<SessionOutcome, AppError> {
        if missing_store_redirect(&session.principal) != Some(STORE_REGISTRATION_ROUTE) {
            return Err(AppError::Forbidden {
                section: Section::Stores,
                action: Action::Add,
            });
        }

        let body = serde_json::to_value(payload)
            .map_err(|e| anyhow::anyhow!("Falha ao montar a loja: {}", e))?;
        self.gateway
            .send(BackendRequest::post("/api/stores", body).with_auth(session.auth()))
            .await
            .map_err(|err| AppError::Store(err.into()))?;

        let principal = self
            .fetch_me(&session.token)
            .await
            .map_err(|err| AppError::Store(err.into()))?;
        let refreshed = self.registry.insert(&session.token, principal).await;
        tracing::info!(user = %refreshed.principal.id, store = ?refreshed.principal.store, "loja cadastrada");

        Ok(SessionOutcome {
            redirect: Some(
                missing_store_redirect(&refreshed.principal)
                    .unwrap_or(HOME_ROUTE)
                    .to_string(),
            ),
            effects: ClientEffects::refresh_user(&refreshed.principal),
            principal: Some(refreshed.principal),
        })
    }

    async fn fetch_me(&self, token: &str) -> Result<Principal, GatewayError> {
        let request = BackendRequest::get("/auth/me").with_auth(BackendAuth::Bearer(token.to_string()));
        let envelope: MeEnvelope = self.gateway.send(request).await.and_then(backend::decode)?;
        Ok(envelope.into_principal())
    }
}
