// src/handlers/categories.rs

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
    models::category::CategoryPayload,
    services::{console_state::ConsoleSession, resources::CategoriesResource},
};

// GET /console/categories
#[utoipa::path(
    get,
    path = "/console/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "Lista de categorias com ações por linha")
    ),
    params(
        ("x-console-route" = Option<String>, Header, description = "Rota atual (/categories ou /home/category)"),
        ("q" = Option<String>, Query, description = "Busca por nome")
    ),
    security(("storex_cookie" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Query(params): Query<QueryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let route = route.or_default("/categories");
    let view = app_state
        .console_service
        .list::<CategoriesResource>(&session, &route, params)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// POST /console/categories
#[utoipa::path(
    post,
    path = "/console/categories",
    tag = "Categories",
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Categoria criada"),
        (status = 403, description = "Cargo sem permissão de cadastro")
    ),
    params(
        ("x-console-route" = Option<String>, Header, description = "Rota atual da interface")
    ),
    security(("storex_cookie" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let route = route.or_default("/categories");
    let created = app_state
        .console_service
        .add::<CategoriesResource, _>(&session, &route, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /console/categories/{id}
#[utoipa::path(
    get,
    path = "/console/categories/{id}",
    tag = "Categories",
    responses(
        (status = 200, description = "Detalhe da categoria; técnico fora da categoria não vê a visão geral")
    ),
    params(
        ("id" = String, Path, description = "ID da categoria"),
        ("x-console-route" = Option<String>, Header, description = "Rota atual da interface")
    ),
    security(("storex_cookie" = []))
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let route = route.or_default(&format!("/categories/view/{id}"));
    let view = app_state
        .console_service
        .detail::<CategoriesResource>(&session, &route, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// PUT /console/categories/{id}
#[utoipa::path(
    put,
    path = "/console/categories/{id}",
    tag = "Categories",
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Categoria atualizada"),
        (status = 403, description = "Sem permissão de edição")
    ),
    params(("id" = String, Path, description = "ID da categoria")),
    security(("storex_cookie" = []))
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let route = route.or_default(&format!("/categories/view/{id}"));
    let updated = app_state
        .console_service
        .edit::<CategoriesResource, _>(&session, &route, &id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// DELETE /console/categories/{id}
#[utoipa::path(
    delete,
    path = "/console/categories/{id}",
    tag = "Categories",
    responses(
        (status = 200, description = "Categoria removida"),
        (status = 403, description = "Sem permissão de remoção")
    ),
    params(("id" = String, Path, description = "ID da categoria")),
    security(("storex_cookie" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let route = route.or_default("/categories");
    let deleted = app_state
        .console_service
        .delete::<CategoriesResource>(&session, &route, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(deleted)))
}
