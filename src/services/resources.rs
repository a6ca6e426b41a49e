// src/services/resources.rs

use crate::{
    common::error::StoreError,
    models::{
        category::Category, principal::Principal, principal::Role, product::Product, store::Store,
        user::User,
    },
    policy::{Ownership, Page, RouteContext, Section},
    services::{
        console_state::ConsoleState,
        entity_store::{EntityStore, PathContext, Resource, ResolvedPath},
    },
};

// Loja para onde a rota aponta: /stores/view/:id, ou a loja do usuário nas telas "minha loja"
fn route_store<'a>(principal: &'a Principal, route: &'a RouteContext) -> Option<&'a str> {
    route.store_detail_id().or(principal.store.as_deref())
}

fn store_scoped(base: &str, store: &str, route: &RouteContext, section: Section) -> ResolvedPath {
    let collection = format!("/api/stores/{store}/{base}");
    let related = match route.page() {
        Page::Detail(id) if route.section() == section => Some(format!("{collection}/{id}")),
        _ => None,
    };
    ResolvedPath {
        list: collection.clone(),
        detail_base: collection,
        related,
    }
}

fn missing_store(resource: &str) -> StoreError {
    tracing::warn!(resource, "rota exige uma loja e o usuário não tem nenhuma");
    StoreError::fail()
}

// ---
// Usuários
// ---
pub struct UsersResource;

impl Resource for UsersResource {
    const NAME: &'static str = "users";
    const SECTION: Section = Section::Users;
    type Record = User;

    // super-admin vê todos; os demais só a equipe da própria loja
    fn resolve_path(ctx: &PathContext<'_>) -> Result<ResolvedPath, StoreError> {
        let scoped = ctx.route.store_detail_id().is_some() || ctx.principal.role != Role::SuperAdmin;
        if !scoped {
            return Ok(ResolvedPath::flat("/api/users"));
        }
        let store = route_store(ctx.principal, ctx.route).ok_or_else(|| missing_store(Self::NAME))?;
        Ok(ResolvedPath {
            list: format!("/api/users/store/{store}"),
            detail_base: "/api/users".to_string(),
            related: None,
        })
    }

    fn slice(state: &mut ConsoleState) -> &mut EntityStore<Self> {
        &mut state.users
    }

    fn page_ownership(principal: &Principal, route: &RouteContext) -> Ownership {
        Ownership {
            own_store: route_store(principal, route).is_some_and(|id| principal.owns_store(id)),
            ..Ownership::default()
        }
    }

    fn record_ownership(principal: &Principal, _route: &RouteContext, record: &User) -> Ownership {
        Ownership {
            own_store: record.store.as_deref().is_some_and(|id| principal.owns_store(id)),
            ..Ownership::default()
        }
    }
}

// ---
// Equipe da loja atual (aba "usuários" do detalhe da loja)
// ---
pub struct StoreUsersResource;

impl Resource for StoreUsersResource {
    const NAME: &'static str = "store-users";
    const SECTION: Section = Section::Users;
    type Record = User;

    fn resolve_path(ctx: &PathContext<'_>) -> Result<ResolvedPath, StoreError> {
        let store = route_store(ctx.principal, ctx.route).ok_or_else(|| missing_store(Self::NAME))?;
        Ok(ResolvedPath {
            list: format!("/api/users/store/{store}"),
            detail_base: "/api/users".to_string(),
            related: None,
        })
    }

    fn slice(state: &mut ConsoleState) -> &mut EntityStore<Self> {
        &mut state.store_users
    }

    fn page_ownership(principal: &Principal, route: &RouteContext) -> Ownership {
        UsersResource::page_ownership(principal, route)
    }

    fn record_ownership(principal: &Principal, route: &RouteContext, record: &User) -> Ownership {
        UsersResource::record_ownership(principal, route, record)
    }
}

// ---
// Lojas
// ---
pub struct StoresResource;

impl Resource for StoresResource {
    const NAME: &'static str = "stores";
    const SECTION: Section = Section::Stores;
    type Record = Store;

    fn resolve_path(ctx: &PathContext<'_>) -> Result<ResolvedPath, StoreError> {
        let mut path = ResolvedPath::flat("/api/stores");
        let focus = match ctx.route.store_detail_id() {
            Some(id) => Some(id),
            None if ctx.route.is_under_home() => ctx.principal.store.as_deref(),
            None => None,
        };
        path.related = focus.map(|id| format!("/api/stores/{id}/sub-stores"));
        Ok(path)
    }

    fn slice(state: &mut ConsoleState) -> &mut EntityStore<Self> {
        &mut state.stores
    }

    fn page_ownership(principal: &Principal, route: &RouteContext) -> Ownership {
        match route.store_detail_id() {
            Some(id) => Ownership::for_store(principal, id),
            None if route.is_under_home() => principal
                .store
                .as_deref()
                .map(|id| Ownership::for_store(principal, id))
                .unwrap_or_default(),
            None => Ownership::default(),
        }
    }

    fn id_ownership(principal: &Principal, _route: &RouteContext, id: &str) -> Ownership {
        Ownership::for_store(principal, id)
    }
}

// ---
// Sub-lojas (sempre debaixo de uma loja mãe)
// ---
pub struct SubStoresResource;

impl SubStoresResource {
    fn parent<'a>(principal: &'a Principal, route: &'a RouteContext) -> Option<&'a str> {
        route_store(principal, route)
    }
}

impl Resource for SubStoresResource {
    const NAME: &'static str = "sub-stores";
    const SECTION: Section = Section::SubStores;
    type Record = Store;

    fn resolve_path(ctx: &PathContext<'_>) -> Result<ResolvedPath, StoreError> {
        let parent = Self::parent(ctx.principal, ctx.route).ok_or_else(|| missing_store(Self::NAME))?;
        Ok(ResolvedPath {
            list: format!("/api/stores/{parent}/sub-stores"),
            detail_base: "/api/stores".to_string(),
            related: None,
        })
    }

    fn slice(state: &mut ConsoleState) -> &mut EntityStore<Self> {
        &mut state.sub_stores
    }

    fn page_ownership(principal: &Principal, route: &RouteContext) -> Ownership {
        Ownership {
            own_store: Self::parent(principal, route).is_some_and(|id| principal.owns_store(id)),
            ..Ownership::default()
        }
    }

    fn record_ownership(principal: &Principal, route: &RouteContext, record: &Store) -> Ownership {
        match record.parent.as_deref() {
            Some(parent) => Ownership {
                own_store: principal.owns_store(parent),
                ..Ownership::default()
            },
            None => Self::page_ownership(principal, route),
        }
    }
}

// ---
// Categorias
// ---
pub struct CategoriesResource;

impl CategoriesResource {
    // Telas "minha loja" e detalhe: caminho com escopo de loja; senão, plano.
    fn scope<'a>(principal: &'a Principal, route: &'a RouteContext) -> Option<&'a str> {
        if let Some(id) = route.store_detail_id() {
            return Some(id);
        }
        let nested = route.section() == Section::Categories
            && (route.is_under_home() || route.detail_id().is_some());
        if nested { principal.store.as_deref() } else { None }
    }
}

impl Resource for CategoriesResource {
    const NAME: &'static str = "categories";
    const SECTION: Section = Section::Categories;
    type Record = Category;

    fn resolve_path(ctx: &PathContext<'_>) -> Result<ResolvedPath, StoreError> {
        Ok(match Self::scope(ctx.principal, ctx.route) {
            Some(store) => store_scoped("category", store, ctx.route, Section::Categories),
            None => ResolvedPath::flat("/api/categories"),
        })
    }

    fn slice(state: &mut ConsoleState) -> &mut EntityStore<Self> {
        &mut state.categories
    }

    fn page_ownership(principal: &Principal, route: &RouteContext) -> Ownership {
        match (route.section(), route.detail_id()) {
            (Section::Categories, Some(id)) => Ownership::for_category(principal, id, None),
            _ => Ownership::default(),
        }
    }

    fn id_ownership(principal: &Principal, _route: &RouteContext, id: &str) -> Ownership {
        Ownership::for_category(principal, id, None)
    }

    fn record_ownership(principal: &Principal, _route: &RouteContext, record: &Category) -> Ownership {
        Ownership::for_category(principal, &record.id, record.user.as_deref())
    }
}

// ---
// Produtos
// ---
pub struct ProductsResource;

impl ProductsResource {
    fn scope<'a>(principal: &'a Principal, route: &'a RouteContext) -> Option<&'a str> {
        if let Some(id) = route.store_detail_id() {
            return Some(id);
        }
        let nested = match route.section() {
            Section::Products => route.is_under_home() || route.detail_id().is_some(),
            // Aba de produtos do detalhe da categoria
            Section::Categories => route.detail_id().is_some(),
            _ => false,
        };
        if nested { principal.store.as_deref() } else { None }
    }
}

impl Resource for ProductsResource {
    const NAME: &'static str = "products";
    const SECTION: Section = Section::Products;
    type Record = Product;

    fn resolve_path(ctx: &PathContext<'_>) -> Result<ResolvedPath, StoreError> {
        Ok(match Self::scope(ctx.principal, ctx.route) {
            Some(store) => store_scoped("product", store, ctx.route, Section::Products),
            None => ResolvedPath::flat("/api/products"),
        })
    }

    fn slice(state: &mut ConsoleState) -> &mut EntityStore<Self> {
        &mut state.products
    }

    // Técnico só lê produtos de categorias atribuídas a ele
    fn page_ownership(principal: &Principal, route: &RouteContext) -> Ownership {
        match (route.section(), route.detail_id()) {
            (Section::Categories, Some(id)) => Ownership::for_category(principal, id, None),
            _ => Ownership::default(),
        }
    }

    fn record_ownership(principal: &Principal, _route: &RouteContext, record: &Product) -> Ownership {
        record
            .category
            .as_deref()
            .map(|category| Ownership::for_category(principal, category, None))
            .unwrap_or_default()
    }
}
