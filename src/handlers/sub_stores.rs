// src/handlers/sub_stores.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        query::QueryParams,
    },
    config::AppState,
    middleware::{i18n::Locale, route::ConsoleRoute},
    models::store::{StorePayload, SubStoreUpdatePayload},
    policy::RouteContext,
    services::{console_state::ConsoleSession, resources::SubStoresResource},
};

// Sub-lojas sempre vivem no detalhe da loja mãe
fn parent_route(parent_id: &str) -> RouteContext {
    RouteContext::parse(&format!("/stores/view/{parent_id}"))
}

// GET /console/stores/{id}/sub-stores
#[utoipa::path(
    get,
    path = "/console/stores/{id}/sub-stores",
    tag = "Sub-Stores",
    responses(
        (status = 200, description = "Sub-lojas da loja mãe"),
        (status = 403, description = "A loja mãe não é do usuário")
    ),
    params(
        ("id" = String, Path, description = "ID da loja mãe"),
        ("q" = Option<String>, Query, description = "Busca por nome")
    ),
    security(("storex_cookie" = []))
)]
pub async fn list_sub_stores(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
    Query(params): Query<QueryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let view = app_state
        .console_service
        .list::<SubStoresResource>(&session, &parent_route(&id), params)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// POST /console/stores/{id}/sub-stores
#[utoipa::path(
    post,
    path = "/console/stores/{id}/sub-stores",
    tag = "Sub-Stores",
    request_body = StorePayload,
    responses(
        (status = 201, description = "Sub-loja criada"),
        (status = 400, description = "Dados inválidos")
    ),
    params(("id" = String, Path, description = "ID da loja mãe")),
    security(("storex_cookie" = []))
)]
pub async fn create_sub_store(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
    Json(payload): Json<StorePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let created = app_state
        .console_service
        .add::<SubStoresResource, _>(&session, &parent_route(&id), &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// PUT /console/sub-stores/{id}
// O payload não tem `storeType`: o tipo fica travado depois da criação.
#[utoipa::path(
    put,
    path = "/console/sub-stores/{id}",
    tag = "Sub-Stores",
    request_body = SubStoreUpdatePayload,
    responses(
        (status = 200, description = "Sub-loja atualizada"),
        (status = 403, description = "Sem permissão de edição")
    ),
    params(
        ("id" = String, Path, description = "ID da sub-loja"),
        ("x-console-route" = Option<String>, Header, description = "Detalhe da loja mãe (/stores/view/:id)")
    ),
    security(("storex_cookie" = []))
)]
pub async fn update_sub_store(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
    Json(payload): Json<SubStoreUpdatePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let route = route.or_default("/home");
    let updated = app_state
        .console_service
        .edit::<SubStoresResource, _>(&session, &route, &id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}
