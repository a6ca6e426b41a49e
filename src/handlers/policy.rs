// src/handlers/policy.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::CookieJar;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::auth_token, i18n::Locale, route::ConsoleRoute},
    policy::{guard, Guard},
    services::{console_service::route_actions, console_state::ConsoleSession},
};

// GET /console/guard
#[utoipa::path(
    get,
    path = "/console/guard",
    tag = "Policy",
    responses(
        (status = 200, description = "{ outcome: allow } ou { outcome: redirect, to }")
    ),
    params(
        ("x-console-route" = Option<String>, Header, description = "Rota atual da interface")
    )
)]
pub async fn get_guard(
    State(app_state): State<AppState>,
    route: ConsoleRoute,
    jar: CookieJar,
) -> Json<Guard> {
    let route = route.or_default("/");
    let session = match auth_token(&jar) {
        Some(token) => app_state.session_service.restore(&token).await,
        None => None,
    };

    let outcome = guard(session.as_ref().map(|s| &s.principal), &route);
    if let Guard::Redirect { to } = &outcome {
        tracing::debug!(from = route.path(), %to, "rota redirecionada");
    }
    Json(outcome)
}

// GET /console/actions
#[utoipa::path(
    get,
    path = "/console/actions",
    tag = "Policy",
    responses(
        (status = 200, description = "Ações e abas liberadas na rota atual"),
        (status = 401, description = "Sessão inválida")
    ),
    params(
        ("x-console-route" = Option<String>, Header, description = "Rota atual da interface")
    ),
    security(("storex_cookie" = []))
)]
pub async fn get_actions(session: ConsoleSession, route: ConsoleRoute) -> impl IntoResponse {
    let route = route.or_default("/");
    Json(route_actions(&session.principal, &route))
}

// GET /console/home
#[utoipa::path(
    get,
    path = "/console/home",
    tag = "Policy",
    responses(
        (status = 200, description = "Painel de boas-vindas, painel da loja ou home vazia"),
        (status = 401, description = "Sessão inválida")
    ),
    security(("storex_cookie" = []))
)]
pub async fn get_home(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
) -> Result<impl IntoResponse, ApiError> {
    let home = app_state
        .console_service
        .home(&session)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(home)))
}
