// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod docs;
mod gateway;
mod handlers;
mod middleware;
mod models;
mod policy;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::{auth::session_guard, request_id::request_span};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG manda; sem ele, "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()?;
    let bind_address = app_state.settings.bind_address;

    // Rotas públicas de sessão
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/register", post(handlers::auth::register))
        .route("/logout", post(handlers::auth::logout));

    // Cadastro da primeira loja: já exige sessão
    let store_registration = Router::new()
        .route("/register/store", post(handlers::auth::register_store))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_guard,
        ));

    // Telas do console (protegidas pelo middleware)
    let console_routes = Router::new()
        .route("/actions", get(handlers::policy::get_actions))
        .route("/home", get(handlers::policy::get_home))
        .route(
            "/stores",
            get(handlers::stores::list_stores).post(handlers::stores::create_store),
        )
        .route(
            "/stores/{id}",
            get(handlers::stores::get_store)
                .put(handlers::stores::update_store)
                .delete(handlers::stores::delete_store),
        )
        .route(
            "/stores/{id}/sub-stores",
            get(handlers::sub_stores::list_sub_stores).post(handlers::sub_stores::create_sub_store),
        )
        .route("/stores/{id}/users", get(handlers::stores::list_store_users))
        .route("/stores/{id}/tech-users", get(handlers::stores::list_tech_users))
        .route("/sub-stores/{id}", put(handlers::sub_stores::update_sub_store))
        .route(
            "/categories",
            get(handlers::categories::list_categories).post(handlers::categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(handlers::categories::get_category)
                .put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .route("/console/session", get(handlers::auth::get_session))
        .route("/console/guard", get(handlers::policy::get_guard))
        .nest("/console/auth", auth_routes.merge(store_registration))
        .nest("/console", console_routes)
        .layer(axum_middleware::from_fn(request_span))
        .with_state(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(bind_address).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
