// src/handlers/products.rs

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
    models::product::ProductPayload,
    services::{console_state::ConsoleSession, resources::ProductsResource},
};

// GET /console/products
#[utoipa::path(
    get,
    path = "/console/products",
    tag = "Products",
    responses(
        (status = 200, description = "Lista de produtos com ações por linha")
    ),
    params(
        ("x-console-route" = Option<String>, Header, description = "Rota atual (/products, /home/product ou o detalhe da categoria)"),
        ("q" = Option<String>, Query, description = "Busca por nome")
    ),
    security(("storex_cookie" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Query(params): Query<QueryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let route = route.or_default("/products");
    let view = app_state
        .console_service
        .list::<ProductsResource>(&session, &route, params)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// POST /console/products
#[utoipa::path(
    post,
    path = "/console/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado"),
        (status = 403, description = "Cargo sem permissão de cadastro")
    ),
    params(
        ("x-console-route" = Option<String>, Header, description = "Rota atual da interface")
    ),
    security(("storex_cookie" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let route = route.or_default("/products");
    let created = app_state
        .console_service
        .add::<ProductsResource, _>(&session, &route, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /console/products/{id}
#[utoipa::path(
    get,
    path = "/console/products/{id}",
    tag = "Products",
    responses(
        (status = 200, description = "Detalhe do produto; técnico só vê produtos das suas categorias")
    ),
    params(
        ("id" = String, Path, description = "ID do produto"),
        ("x-console-route" = Option<String>, Header, description = "Rota atual da interface")
    ),
    security(("storex_cookie" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let route = route.or_default(&format!("/products/view/{id}"));
    let view = app_state
        .console_service
        .detail::<ProductsResource>(&session, &route, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// PUT /console/products/{id}
#[utoipa::path(
    put,
    path = "/console/products/{id}",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado"),
        (status = 403, description = "Sem permissão de edição")
    ),
    params(("id" = String, Path, description = "ID do produto")),
    security(("storex_cookie" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let route = route.or_default(&format!("/products/view/{id}"));
    let updated = app_state
        .console_service
        .edit::<ProductsResource, _>(&session, &route, &id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// DELETE /console/products/{id}
#[utoipa::path(
    delete,
    path = "/console/products/{id}",
    tag = "Products",
    responses(
        (status = 200, description = "Produto removido"),
        (status = 403, description = "Sem permissão de remoção")
    ),
    params(("id" = String, Path, description = "ID do produto")),
    security(("storex_cookie" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let route = route.or_default("/products");
    let deleted = app_state
        .console_service
        .delete::<ProductsResource>(&session, &route, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(deleted)))
}
