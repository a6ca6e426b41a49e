// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    services::{client_state::AUTH_COOKIE, console_state::ConsoleSession},
};

// O token do cookie StorexAuth, se houver
pub fn auth_token(jar: &CookieJar) -> Option<String> {
    jar.get(AUTH_COOKIE)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}

// O middleware em si: sem sessão válida, 401 com redirecionamento para o login
pub async fn session_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = match auth_token(&jar) {
        Some(token) => app_state.session_service.restore(&token).await,
        None => None,
    };

    let Some(session) = session else {
        return Err(AppError::SessionInvalid.to_api_error(&locale, &app_state.i18n_store));
    };

    tracing::debug!(user = %session.principal.id, role = session.principal.role.as_str(), "sessão válida");

    // Insere a sessão nos "extensions" da requisição
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

// Extrator para obter a sessão diretamente nos handlers
impl<S> FromRequestParts<S> for ConsoleSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ConsoleSession>()
            .cloned()
            .ok_or(AppError::SessionInvalid)
    }
}
