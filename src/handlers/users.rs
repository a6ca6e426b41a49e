// src/handlers/users.rs

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
    models::user::UserPayload,
    services::{console_state::ConsoleSession, password::PasswordHasher, resources::UsersResource},
};

// Valida e aplica o pré-hash da senha (quando veio uma)
async fn prepare_payload(
    hasher: &PasswordHasher,
    mut payload: UserPayload,
) -> Result<UserPayload, AppError> {
    payload.validate()?;
    if let Some(password) = payload.password.take() {
        payload.password = Some(hasher.prepare(&password).await?);
    }
    Ok(payload)
}

// GET /console/users
#[utoipa::path(
    get,
    path = "/console/users",
    tag = "Users",
    responses(
        (status = 200, description = "Usuários (todos para super-admin, a equipe da loja para os demais)"),
        (status = 403, description = "Cargo sem acesso a usuários")
    ),
    params(
        ("x-console-route" = Option<String>, Header, description = "Rota atual da interface"),
        ("q" = Option<String>, Query, description = "Busca por nome ou e-mail"),
        ("role" = Option<String>, Query, description = "Filtro por cargo")
    ),
    security(("storex_cookie" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Query(params): Query<QueryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let route = route.or_default("/users");
    let view = app_state
        .console_service
        .list::<UsersResource>(&session, &route, params)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// POST /console/users
#[utoipa::path(
    post,
    path = "/console/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Usuário criado"),
        (status = 400, description = "Dados inválidos (ex.: e-mail em uso)")
    ),
    security(("storex_cookie" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Json(payload): Json<UserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = prepare_payload(&app_state.password_hasher, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let route = route.or_default("/users");
    let created = app_state
        .console_service
        .add::<UsersResource, _>(&session, &route, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /console/users/{id}
#[utoipa::path(
    get,
    path = "/console/users/{id}",
    tag = "Users",
    responses(
        (status = 200, description = "Detalhe do usuário (sem senha)")
    ),
    params(("id" = String, Path, description = "ID do usuário")),
    security(("storex_cookie" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let route = route.or_default(&format!("/users/view/{id}"));
    let view = app_state
        .console_service
        .detail::<UsersResource>(&session, &route, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// PUT /console/users/{id}
#[utoipa::path(
    put,
    path = "/console/users/{id}",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Usuário atualizado"),
        (status = 403, description = "Sem permissão de edição")
    ),
    params(("id" = String, Path, description = "ID do usuário")),
    security(("storex_cookie" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
    Json(payload): Json<UserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = prepare_payload(&app_state.password_hasher, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let route = route.or_default(&format!("/users/view/{id}"));
    let updated = app_state
        .console_service
        .edit::<UsersResource, _>(&session, &route, &id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// DELETE /console/users/{id}
#[utoipa::path(
    delete,
    path = "/console/users/{id}",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário removido"),
        (status = 403, description = "Sem permissão de remoção")
    ),
    params(("id" = String, Path, description = "ID do usuário")),
    security(("storex_cookie" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    route: ConsoleRoute,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let route = route.or_default("/users");
    let deleted = app_state
        .console_service
        .delete::<UsersResource>(&session, &route, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(deleted)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::principal::Role;

    fn payload(password: Option<&str>) -> UserPayload {
        UserPayload {
            full_name: "Ana".into(),
            email: "ana@storex.com".into(),
            password: password.map(str::to_string),
            role: Role::Tech,
            gender: None,
            birthday: None,
            phone: None,
            address: None,
            city: None,
            country: None,
            store: Some("s1".into()),
        }
    }

    #[tokio::test]
    async fn password_is_prehashed_before_leaving_the_console() {
        let hasher = PasswordHasher::new(Some([1u8; 16]), 4);
        let prepared = prepare_payload(&hasher, payload(Some("segredo123"))).await.unwrap();
        assert!(prepared.password.unwrap().starts_with("$2b$04$"));

        let untouched = prepare_payload(&hasher, payload(None)).await.unwrap();
        assert_eq!(untouched.password, None);
    }

    #[tokio::test]
    async fn short_password_fails_validation_first() {
        let hasher = PasswordHasher::new(None, 10);
        let err = prepare_payload(&hasher, payload(Some("123"))).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
