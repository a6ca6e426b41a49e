// src/handlers/stores.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        query::QueryParams,
    },
    config::AppState,
    middleware::{i18n::Locale, route::ConsoleRoute},
    models::store::StorePayload,
    policy::RouteContext,
    services::{
        console_state::ConsoleSession,
        resources::{StoreUsersResource, StoresResource},
    },
};

// Apagar uma loja leva junto sub-lojas, categorias e produtos: só com confirmação explícita
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteStoreQuery {
    #[serde(default)]
    pub confirm: bool,
}

// GET /console/stores
#[utoipa::path(
    get,
    path = "/console/stores",
    tag = "Stores",
    responses(
        (status = 200, description = "Lista de lojas com ações por linha"),
        (status = 403, description = "Cargo sem acesso à lista de lojas")
    ),
    params(
        ("x-console-route" = Option<String>, Header, description = "Rota atual da interface"),
        ("q" = Option<String>, Query, description = "Busca por nome"),
        ("storeType" = Option<String>, Query, description = "individual | branch")
    ),
    security(("storex_cookie" = []))
)]
pub async fn list_stores(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Query(params): Query<QueryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let route = route.or_default("/stores");
    let view = app_state
        .console_service
        .list::<StoresResource>(&session, &route, params)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// POST /console/stores
#[utoipa::path(
    post,
    path = "/console/stores",
    tag = "Stores",
    request_body = StorePayload,
    responses(
        (status = 201, description = "Loja criada"),
        (status = 400, description = "Dados inválidos")
    ),
    security(("storex_cookie" = []))
)]
pub async fn create_store(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Json(payload): Json<StorePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let route = route.or_default("/stores");
    let created = app_state
        .console_service
        .add::<StoresResource, _>(&session, &route, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /console/stores/{id}
#[utoipa::path(
    get,
    path = "/console/stores/{id}",
    tag = "Stores",
    responses(
        (status = 200, description = "Detalhe da loja, abas e ações (404 vira alerta)"),
        (status = 403, description = "Sem acesso a esta loja")
    ),
    params(
        ("id" = String, Path, description = "ID da loja"),
        ("x-console-route" = Option<String>, Header, description = "Rota atual da interface")
    ),
    security(("storex_cookie" = []))
)]
pub async fn get_store(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let route = route.or_default(&format!("/stores/view/{id}"));
    let view = app_state
        .console_service
        .detail::<StoresResource>(&session, &route, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// PUT /console/stores/{id}
#[utoipa::path(
    put,
    path = "/console/stores/{id}",
    tag = "Stores",
    request_body = StorePayload,
    responses(
        (status = 200, description = "Loja atualizada"),
        (status = 403, description = "Sem permissão de edição")
    ),
    params(("id" = String, Path, description = "ID da loja")),
    security(("storex_cookie" = []))
)]
pub async fn update_store(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
    Json(payload): Json<StorePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let route = route.or_default(&format!("/stores/view/{id}"));
    let updated = app_state
        .console_service
        .edit::<StoresResource, _>(&session, &route, &id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// DELETE /console/stores/{id}?confirm=true
#[utoipa::path(
    delete,
    path = "/console/stores/{id}",
    tag = "Stores",
    responses(
        (status = 200, description = "Loja removida"),
        (status = 409, description = "Faltou confirmar a remoção")
    ),
    params(("id" = String, Path, description = "ID da loja"), DeleteStoreQuery),
    security(("storex_cookie" = []))
)]
pub async fn delete_store(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
    Query(query): Query<DeleteStoreQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if !query.confirm {
        return Err(AppError::ConfirmationRequired.to_api_error(&locale, &app_state.i18n_store));
    }

    let route = route.or_default("/stores");
    let deleted = app_state
        .console_service
        .delete::<StoresResource>(&session, &route, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(deleted)))
}

// GET /console/stores/{id}/users
#[utoipa::path(
    get,
    path = "/console/stores/{id}/users",
    tag = "Stores",
    responses(
        (status = 200, description = "Equipe da loja (aba usuários)"),
        (status = 403, description = "Sem acesso à equipe desta loja")
    ),
    params(("id" = String, Path, description = "ID da loja")),
    security(("storex_cookie" = []))
)]
pub async fn list_store_users(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
    Query(params): Query<QueryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let route = RouteContext::parse(&format!("/stores/view/{id}"));
    let view = app_state
        .console_service
        .list::<StoreUsersResource>(&session, &route, params)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// GET /console/stores/{id}/tech-users
#[utoipa::path(
    get,
    path = "/console/stores/{id}/tech-users",
    tag = "Stores",
    responses(
        (status = 200, description = "Usuários da loja com cargo tech (candidatos de categoria)")
    ),
    params(("id" = String, Path, description = "ID da loja")),
    security(("storex_cookie" = []))
)]
pub async fn list_tech_users(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let techs = app_state
        .console_service
        .tech_users(&session, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(techs)))
}
