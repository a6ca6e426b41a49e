// src/handlers/auth.rs

use axum::{extract::State, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::auth_token, i18n::Locale},
    models::{
        auth::{LoginUserPayload, RegisterUserPayload},
        principal::Principal,
        store::StorePayload,
    },
    services::{
        client_state::{ClientState, CookieEffect, StorageDelta, AUTH_COOKIE},
        console_state::ConsoleSession,
        session_service::SessionOutcome,
    },
};

// ---
// Resposta comum das rotas de sessão
// ---
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub principal: Option<Principal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/")]
    pub redirect: Option<String>,
    // O que a interface deve gravar/apagar no localStorage
    #[schema(value_type = Object)]
    pub storage: StorageDelta,
}

// Traduz os efeitos da sessão em Set-Cookie + corpo JSON
pub fn session_response(
    jar: CookieJar,
    outcome: SessionOutcome,
    secure: bool,
) -> (CookieJar, Json<SessionResponse>) {
    let jar = match outcome.effects.cookie {
        Some(CookieEffect::Set(token)) => jar.add(
            Cookie::build((AUTH_COOKIE, token))
                .path("/")
                .http_only(true)
                .secure(secure)
                .same_site(SameSite::Lax),
        ),
        Some(CookieEffect::Clear) => jar.remove(Cookie::build(AUTH_COOKIE).path("/")),
        None => jar,
    };

    let body = SessionResponse {
        principal: outcome.principal,
        redirect: outcome.redirect,
        storage: outcome.effects.storage,
    };
    (jar, Json(body))
}

// POST /console/auth/login
#[utoipa::path(
    post,
    path = "/console/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Sessão iniciada (cookie StorexAuth definido)", body = SessionResponse),
        (status = 400, description = "Credenciais inválidas (erro por campo)")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: CookieJar,
    Json(payload): Json<LoginUserPayload>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let outcome = app_state
        .session_service
        .login(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(session_response(jar, outcome, app_state.settings.cookie_secure))
}

// POST /console/auth/register
#[utoipa::path(
    post,
    path = "/console/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 200, description = "Conta store-admin criada e sessão iniciada", body = SessionResponse),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: CookieJar,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let outcome = app_state
        .session_service
        .register(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(session_response(jar, outcome, app_state.settings.cookie_secure))
}

// POST /console/auth/register/store
#[utoipa::path(
    post,
    path = "/console/auth/register/store",
    tag = "Auth",
    request_body = StorePayload,
    responses(
        (status = 200, description = "Primeira loja cadastrada; principal recarregado", body = SessionResponse),
        (status = 403, description = "A conta já tem loja")
    ),
    security(("storex_cookie" = []))
)]
pub async fn register_store(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    jar: CookieJar,
    Json(payload): Json<StorePayload>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let outcome = app_state
        .session_service
        .register_store(&session, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(session_response(jar, outcome, app_state.settings.cookie_secure))
}

// POST /console/auth/logout
#[utoipa::path(
    post,
    path = "/console/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Cookie e espelhos limpos; redireciona para /login", body = SessionResponse)
    )
)]
pub async fn logout(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    let client = ClientState::from_cookie(auth_token(&jar));
    let outcome = app_state.session_service.logout(&client).await;
    session_response(jar, outcome, app_state.settings.cookie_secure)
}

// GET /console/session
#[utoipa::path(
    get,
    path = "/console/session",
    tag = "Auth",
    responses(
        (status = 200, description = "Principal restaurado do cookie (ou nenhum). Nunca falha.", body = SessionResponse)
    )
)]
pub async fn get_session(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    let client = ClientState::from_cookie(auth_token(&jar));
    let outcome = app_state.session_service.initialize(&client).await;
    session_response(jar, outcome, app_state.settings.cookie_secure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::client_state::ClientEffects;
    use axum::response::IntoResponse;

    #[test]
    fn sign_out_expires_the_auth_cookie() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(axum::http::header::COOKIE, "StorexAuth=tok".parse().unwrap());
        let jar = CookieJar::from_headers(&headers);
        let outcome = SessionOutcome {
            principal: None,
            redirect: Some("/login".into()),
            effects: ClientEffects::sign_out(),
        };

        let (jar, Json(body)) = session_response(jar, outcome, true);
        assert!(jar.get(AUTH_COOKIE).is_none());
        assert_eq!(body.storage.remove.len(), 3);

        let response = (jar, Json(body)).into_response();
        let set_cookie = response
            .headers()
            .get(axum::http::header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .unwrap();
        assert!(set_cookie.starts_with("StorexAuth="));
    }
}
