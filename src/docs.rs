// src/docs.rs

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::register,
        handlers::auth::register_store,
        handlers::auth::logout,
        handlers::auth::get_session,

        // --- Policy ---
        handlers::policy::get_guard,
        handlers::policy::get_actions,
        handlers::policy::get_home,

        // --- Stores ---
        handlers::stores::list_stores,
        handlers::stores::create_store,
        handlers::stores::get_store,
        handlers::stores::update_store,
        handlers::stores::delete_store,
        handlers::stores::list_store_users,
        handlers::stores::list_tech_users,

        // --- Sub-Stores ---
        handlers::sub_stores::list_sub_stores,
        handlers::sub_stores::create_sub_store,
        handlers::sub_stores::update_sub_store,

        // --- Categories ---
        handlers::categories::list_categories,
        handlers::categories::create_category,
        handlers::categories::get_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        // --- Products ---
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
    ),
    components(
        schemas(
            // --- Auth ---
            models::principal::Role,
            models::principal::Principal,
            models::auth::LoginUserPayload,
            models::auth::RegisterUserPayload,
            handlers::auth::SessionResponse,

            // --- Stores ---
            models::store::StoreType,
            models::store::Store,
            models::store::StorePayload,
            models::store::SubStoreUpdatePayload,

            // --- Catalog ---
            models::category::Category,
            models::category::CategoryPayload,
            models::product::ProductType,
            models::product::Product,
            models::product::ProductPayload,

            // --- Users ---
            models::user::Gender,
            models::user::User,
            models::user::UserPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Login, Registro e Sessão"),
        (name = "Policy", description = "Guarda de Rotas, Ações e Home"),
        (name = "Stores", description = "Lojas e a Equipe da Loja"),
        (name = "Sub-Stores", description = "Sub-lojas de uma Loja Mãe"),
        (name = "Categories", description = "Categorias e Técnicos Responsáveis"),
        (name = "Products", description = "Produtos"),
        (name = "Users", description = "Usuários")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "storex_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("StorexAuth"))),
        );
    }
}
