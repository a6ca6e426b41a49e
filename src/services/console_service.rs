// src/services/console_service.rs

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::{
    common::{
        error::{AppError, StoreError, StoreErrorKind},
        query::QueryParams,
    },
    gateway::BackendGateway,
    models::{
        listing::Row,
        principal::{Principal, Role},
        store::Store,
        user::User,
    },
    policy::{detail_tabs, resolve_actions, Action, ActionSet, Ownership, RouteContext, Section, Tab},
    services::{
        console_state::{ConsoleRegistry, ConsoleSession},
        entity_store::{EntityStore, PathContext, Resource},
        resources::{
            CategoriesResource, ProductsResource, StoreUsersResource, StoresResource,
            SubStoresResource, UsersResource,
        },
        views::{Alert, DetailView, HomeView, ListView, RowView},
    },
};

fn require(actions: &ActionSet, section: Section, action: Action) -> Result<(), AppError> {
    if actions.contains(action) {
        Ok(())
    } else {
        Err(AppError::Forbidden { section, action })
    }
}

fn list_view<R: Resource>(
    store: &EntityStore<R>,
    principal: &Principal,
    route: &RouteContext,
    actions: ActionSet,
) -> ListView<R::Record> {
    let rows = store
        .list()
        .iter()
        .map(|record| RowView {
            actions: resolve_actions(
                principal.role,
                R::SECTION,
                R::record_ownership(principal, route, record),
            ),
            row: Row::new(record.clone()),
        })
        .collect();

    ListView {
        status: store.status(),
        rows,
        total: store.total(),
        params: store.params().clone(),
        actions,
        error: store.error().cloned(),
    }
}

// As ações (e abas, no detalhe) que a rota atual libera para o principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteActions {
    pub section: Section,
    pub actions: ActionSet,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tabs: Vec<Tab>,
}

fn ownership_of<R: Resource>(principal: &Principal, route: &RouteContext) -> Ownership {
    match route.detail_id() {
        Some(id) => R::id_ownership(principal, route, id),
        None => R::page_ownership(principal, route),
    }
}

pub fn route_actions(principal: &Principal, route: &RouteContext) -> RouteActions {
    let section = route.section();
    let ownership = match section {
        Section::Users => ownership_of::<UsersResource>(principal, route),
        Section::Stores => ownership_of::<StoresResource>(principal, route),
        Section::SubStores => ownership_of::<SubStoresResource>(principal, route),
        Section::Categories => ownership_of::<CategoriesResource>(principal, route),
        Section::Products => ownership_of::<ProductsResource>(principal, route),
        Section::Home | Section::Auth | Section::Unknown => Ownership::default(),
    };

    let tabs = match route.detail_id() {
        Some(_) => detail_tabs(principal.role, section, ownership),
        None => Vec::new(),
    };

    RouteActions {
        section,
        actions: resolve_actions(principal.role, section, ownership),
        tabs,
    }
}

/// Orquestra as telas do console: política primeiro, depois o store do recurso.
///
/// Toda operação segura o estado da sessão durante a chamada à API remota, então
/// duas ações da mesma sessão nunca se cruzam. O caminho é sempre resolvido
/// antes do fetch.
#[derive(Clone)]
pub struct ConsoleService {
    gateway: Arc<dyn BackendGateway>,
    registry: ConsoleRegistry,
}

impl ConsoleService {
    pub fn new(gateway: Arc<dyn BackendGateway>, registry: ConsoleRegistry) -> Self {
        Self { gateway, registry }
    }

    // Sessão recusada pela API remota: descarta os stores e manda para o login
    async fn escalate(&self, session: &ConsoleSession, err: StoreError) -> AppError {
        if err.kind == StoreErrorKind::SessionInvalid {
            self.registry.evict(&session.token).await;
            tracing::info!(user = %session.principal.id, "sessão recusada pela API remota");
            return AppError::SessionInvalid;
        }
        AppError::Store(err)
    }

    // Posse do alvo de edit/delete: vem sempre de um registro, do cache ou buscado na API.
    // Só o id não basta (um usuário de outra loja tem o mesmo formato de id).
    async fn target_ownership<R: Resource>(
        &self,
        session: &ConsoleSession,
        store: &mut EntityStore<R>,
        route: &RouteContext,
        id: &str,
    ) -> Result<Ownership, AppError> {
        let principal = &session.principal;
        if let Err(err) = store.resolve_path(&PathContext { principal, route }) {
            return Err(self.escalate(session, err).await);
        }
        if let Some(record) = store.find_cached(id) {
            return Ok(R::record_ownership(principal, route, record));
        }

        if let Err(err) = store.fetch_one(self.gateway.as_ref(), &session.auth(), id).await {
            return Err(self.escalate(session, err).await);
        }
        match store.current() {
            Some(record) => Ok(R::record_ownership(principal, route, record)),
            None => Err(AppError::Store(StoreError::fail())),
        }
    }

    pub async fn list<R: Resource>(
        &self,
        session: &ConsoleSession,
        route: &RouteContext,
        params: QueryParams,
    ) -> Result<ListView<R::Record>, AppError> {
        let principal = &session.principal;
        let actions = resolve_actions(principal.role, R::SECTION, R::page_ownership(principal, route));
        require(&actions, R::SECTION, Action::List)?;

        let mut state = session.state.lock().await;
        let store = R::slice(&mut state);
        if let Err(err) = store.resolve_path(&PathContext { principal, route }) {
            return Err(self.escalate(session, err).await);
        }

        // Erros comuns ficam dentro da view; só sessão inválida interrompe
        match store.fetch(self.gateway.as_ref(), &session.auth(), params).await {
            Err(err) if err.kind == StoreErrorKind::SessionInvalid => {
                return Err(self.escalate(session, err).await);
            }
            _ => {}
        }

        Ok(list_view(store, principal, route, actions))
    }

    pub async fn detail<R: Resource>(
        &self,
        session: &ConsoleSession,
        route: &RouteContext,
        id: &str,
    ) -> Result<DetailView<R::Record>, AppError> {
        let principal = &session.principal;
        let section = R::SECTION;

        // Sem nenhuma ação nem aba para o alvo, nem vale buscar o registro
        let pre_ownership = R::id_ownership(principal, route, id);
        let pre = resolve_actions(principal.role, section, pre_ownership);
        if pre.is_empty() && detail_tabs(principal.role, section, pre_ownership).is_empty() {
            return Err(AppError::Forbidden {
                section,
                action: Action::View,
            });
        }

        let mut state = session.state.lock().await;
        let store = R::slice(&mut state);
        if let Err(err) = store.resolve_path(&PathContext { principal, route }) {
            return Err(self.escalate(session, err).await);
        }

        let fetched = store.fetch_one(self.gateway.as_ref(), &session.auth(), id).await;

        let ownership = match store.current() {
            Some(record) => R::record_ownership(principal, route, record),
            None => R::id_ownership(principal, route, id),
        };
        let actions = resolve_actions(principal.role, section, ownership);
        let tabs = detail_tabs(principal.role, section, ownership);

        let (alert, error) = match fetched {
            Ok(()) => (None, None),
            Err(err) if err.kind == StoreErrorKind::SessionInvalid => {
                return Err(self.escalate(session, err).await);
            }
            // Em /home uma loja ausente é um estado esperado: sem alerta
            Err(err) if err.is_not_found() && route.is_under_home() => (None, None),
            Err(err) if err.is_not_found() => (
                Some(Alert {
                    message: err.message.clone(),
                    back_link: section.list_route().to_string(),
                }),
                Some(err),
            ),
            Err(err) => (None, Some(err)),
        };

        let record = store.current().cloned();
        if record.is_some() && !actions.contains(Action::View) && tabs.is_empty() {
            return Err(AppError::Forbidden {
                section,
                action: Action::View,
            });
        }

        Ok(DetailView {
            status: store.status(),
            record,
            tabs,
            actions,
            alert,
            error,
        })
    }

    pub async fn add<R, D>(
        &self,
        session: &ConsoleSession,
        route: &RouteContext,
        draft: &D,
    ) -> Result<Value, AppError>
    where
        R: Resource,
        D: Serialize + Sync + ?Sized,
    {
        let principal = &session.principal;
        let actions = resolve_actions(principal.role, R::SECTION, R::page_ownership(principal, route));
        require(&actions, R::SECTION, Action::Add)?;

        let mut state = session.state.lock().await;
        let store = R::slice(&mut state);
        let outcome = match store.resolve_path(&PathContext { principal, route }) {
            Ok(()) => store.add(self.gateway.as_ref(), &session.auth(), draft).await,
            Err(err) => Err(err),
        };
        drop(state);

        match outcome {
            Ok(created) => {
                tracing::info!(resource = R::NAME, user = %principal.id, "registro criado");
                Ok(created)
            }
            Err(err) => Err(self.escalate(session, err).await),
        }
    }

    pub async fn edit<R, D>(
        &self,
        session: &ConsoleSession,
        route: &RouteContext,
        id: &str,
        draft: &D,
    ) -> Result<Value, AppError>
    where
        R: Resource,
        D: Serialize + Sync + ?Sized,
    {
        let principal = &session.principal;
        require(&resolve_actions(principal.role, R::SECTION, Ownership::any()), R::SECTION, Action::Edit)?;

        let mut state = session.state.lock().await;
        let store = R::slice(&mut state);
        let ownership = self.target_ownership(session, store, route, id).await?;
        require(&resolve_actions(principal.role, R::SECTION, ownership), R::SECTION, Action::Edit)?;

        let outcome = store.edit(self.gateway.as_ref(), &session.auth(), id, draft).await;
        drop(state);

        match outcome {
            Ok(updated) => {
                tracing::info!(resource = R::NAME, id, user = %principal.id, "registro atualizado");
                Ok(updated)
            }
            Err(err) => Err(self.escalate(session, err).await),
        }
    }

    pub async fn delete<R: Resource>(
        &self,
        session: &ConsoleSession,
        route: &RouteContext,
        id: &str,
    ) -> Result<Value, AppError> {
        let principal = &session.principal;
        require(&resolve_actions(principal.role, R::SECTION, Ownership::any()), R::SECTION, Action::Delete)?;

        let mut state = session.state.lock().await;
        let store = R::slice(&mut state);
        let ownership = self.target_ownership(session, store, route, id).await?;
        require(&resolve_actions(principal.role, R::SECTION, ownership), R::SECTION, Action::Delete)?;

        let outcome = store.delete(self.gateway.as_ref(), &session.auth(), id).await;
        drop(state);

        match outcome {
            Ok(deleted) => {
                tracing::info!(resource = R::NAME, id, user = %principal.id, "registro removido");
                Ok(deleted)
            }
            Err(err) => Err(self.escalate(session, err).await),
        }
    }

    // A home depende só do cargo: painel de boas-vindas, painel da própria loja ou nada
    pub async fn home(&self, session: &ConsoleSession) -> Result<HomeView, AppError> {
        let principal = &session.principal;
        let actions = resolve_actions(principal.role, Section::Home, Default::default());

        if actions.contains(Action::WelcomePanel) {
            return Ok(HomeView::Welcome {
                full_name: principal.full_name.clone(),
            });
        }

        if actions.contains(Action::StoreDashboard) {
            let Some(store_id) = principal.store.clone() else {
                return Ok(HomeView::Empty);
            };
            let route = RouteContext::parse("/home");
            let store: DetailView<Store> = self.detail::<StoresResource>(session, &route, &store_id).await?;
            return Ok(HomeView::StoreDashboard { store });
        }

        Ok(HomeView::Empty)
    }

    /// Candidatos a técnico de uma categoria: a equipe da loja, filtrada pelo cargo `tech`.
    pub async fn tech_users(
        &self,
        session: &ConsoleSession,
        store_id: &str,
    ) -> Result<Vec<Row<User>>, AppError> {
        let principal = &session.principal;
        let actions = resolve_actions(principal.role, Section::Categories, Default::default());
        require(&actions, Section::Categories, Action::Edit)?;
        // Só a equipe da própria loja
        if principal.role != Role::SuperAdmin && !principal.owns_store(store_id) {
            return Err(AppError::Forbidden {
                section: Section::Categories,
                action: Action::Edit,
            });
        }

        let route = RouteContext::parse(&format!("/stores/view/{store_id}"));

        let mut state = session.state.lock().await;
        let store = StoreUsersResource::slice(&mut state);
        let fetched = match store.resolve_path(&PathContext { principal, route: &route }) {
            Ok(()) => store.fetch(self.gateway.as_ref(), &session.auth(), QueryParams::new()).await,
            Err(err) => Err(err),
        };
        let techs: Vec<Row<User>> = store
            .list()
            .iter()
            .filter(|user| user.role == Role::Tech)
            .cloned()
            .map(Row::new)
            .collect();
        drop(state);

        match fetched {
            Ok(()) => Ok(techs),
            Err(err) => Err(self.escalate(session, err).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gateway::{fake::FakeGateway, HttpMethod},
        models::principal::Role,
    };
    use serde_json::json;

    fn principal(role: Role, store: Option<&str>) -> Principal {
        Principal {
            id: "u1".into(),
            full_name: "Ana".into(),
            email: "ana@storex.com".into(),
            role,
            store: store.map(str::to_string),
            sub_stores: vec![],
            categories: vec!["c1".into()],
        }
    }

    async fn setup(role: Role, store: Option<&str>) -> (Arc<FakeGateway>, ConsoleService, ConsoleSession) {
        let gateway = Arc::new(FakeGateway::new());
        let registry = ConsoleRegistry::new();
        let session = registry.insert("tok", principal(role, store)).await;
        let service = ConsoleService::new(gateway.clone(), registry);
        (gateway, service, session)
    }

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn list_strips_empty_filters_but_keeps_them_in_state() {
        let (gateway, service, session) = setup(Role::SuperAdmin, None).await;
        gateway.reply(json!({ "data": [{ "_id": "s1", "name": "Centro", "storeType": "branch" }], "total": 7 }));

        let route = RouteContext::parse("/stores");
        let view = service
            .list::<StoresResource>(&session, &route, params(&[("q", ""), ("storeType", "branch")]))
            .await
            .unwrap();

        let call = gateway.last_call();
        assert_eq!(call.path, "/api/stores");
        assert_eq!(call.query, vec![("storeType".to_string(), "branch".to_string())]);

        assert_eq!(view.total, 7);
        assert_eq!(view.params.get("q").map(String::as_str), Some(""));
        assert_eq!(view.rows[0].row.id, "s1");
        assert!(view.rows[0].actions.contains(Action::Delete));
    }

    #[tokio::test]
    async fn add_refetches_with_the_stored_params() {
        let (gateway, service, session) = setup(Role::StoreAdmin, Some("s1")).await;
        let route = RouteContext::parse("/home/category");

        service
            .list::<CategoriesResource>(&session, &route, params(&[("q", "cel"), ("page", "2")]))
            .await
            .unwrap();
        gateway.reply(json!({ "_id": "c9", "name": "Nova" })).reply(json!([]));

        service
            .add::<CategoriesResource, _>(&session, &route, &json!({ "name": "Nova" }))
            .await
            .unwrap();

        let calls = gateway.calls();
        let post = &calls[calls.len() - 2];
        assert_eq!(post.method, HttpMethod::Post);
        assert_eq!(post.path, "/api/stores/s1/category");

        let refetch = gateway.last_call();
        assert_eq!(refetch.method, HttpMethod::Get);
        assert_eq!(
            refetch.query,
            vec![("page".to_string(), "2".to_string()), ("q".to_string(), "cel".to_string())]
        );
    }

    #[tokio::test]
    async fn field_errors_come_back_normalized() {
        let (gateway, service, session) = setup(Role::SuperAdmin, None).await;
        gateway.fail(400, "Email already in use/type:email");

        let err = service
            .add::<UsersResource, _>(
                &session,
                &RouteContext::parse("/users"),
                &json!({ "email": "x@y.z" }),
            )
            .await
            .unwrap_err();

        match err {
            AppError::Store(err) => {
                assert_eq!(err.type_tag(), "email");
                assert_eq!(err.message, "Email already in use");
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_record_renders_an_alert_outside_home() {
        let (gateway, service, session) = setup(Role::SuperAdmin, None).await;
        gateway.fail(404, "Store not found");

        let view = service
            .detail::<StoresResource>(&session, &RouteContext::parse("/stores/view/s9"), "s9")
            .await
            .unwrap();

        let alert = view.alert.unwrap();
        assert_eq!(alert.back_link, "/stores");
        assert!(view.record.is_none());
    }

    #[tokio::test]
    async fn missing_own_store_is_silent_on_the_home_page() {
        let (gateway, service, session) = setup(Role::StoreAdmin, Some("s1")).await;
        gateway.fail(404, "Store not found");

        let home = service.home(&session).await.unwrap();
        match home {
            HomeView::StoreDashboard { store } => {
                assert!(store.alert.is_none());
                assert!(store.error.is_none());
            }
            other => panic!("home inesperada: {other:?}"),
        }
        assert_eq!(gateway.last_call().path, "/api/stores/s1");
    }

    #[tokio::test]
    async fn store_admin_opens_own_store_and_dashboard() {
        let (gateway, service, session) = setup(Role::StoreAdmin, Some("s1")).await;
        let own = json!({ "_id": "s1", "name": "Centro", "storeType": "individual" });
        gateway.reply(own.clone()).reply(own);

        let view = service
            .detail::<StoresResource>(&session, &RouteContext::parse("/stores/view/s1"), "s1")
            .await
            .unwrap();
        assert_eq!(view.actions, ActionSet::of(&[Action::View, Action::Edit]));
        assert_eq!(view.record.map(|store| store.id), Some("s1".to_string()));

        match service.home(&session).await.unwrap() {
            HomeView::StoreDashboard { store } => assert!(store.record.is_some()),
            other => panic!("home inesperada: {other:?}"),
        }
        assert_eq!(gateway.last_call().path, "/api/stores/s1");
    }

    #[tokio::test]
    async fn lead_tech_reads_only_own_store() {
        let (gateway, service, session) = setup(Role::LeadTech, Some("s1")).await;
        gateway.reply(json!({ "_id": "s1", "name": "Centro", "storeType": "individual" }));

        let view = service
            .detail::<StoresResource>(&session, &RouteContext::parse("/stores/view/s1"), "s1")
            .await
            .unwrap();
        assert_eq!(view.actions, ActionSet::of(&[Action::View]));
        assert_eq!(view.tabs, vec![Tab::Categories, Tab::Products]);

        let err = service
            .detail::<StoresResource>(&session, &RouteContext::parse("/stores/view/s2"), "s2")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden { section: Section::Stores, .. }));
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn editing_an_uncached_user_checks_the_user_store() {
        let (gateway, service, session) = setup(Role::StoreAdmin, Some("s1")).await;
        let route = RouteContext::parse("/users");
        gateway.reply(json!({
            "_id": "u9", "fullName": "Rui", "email": "r@s.com", "role": "salesman", "store": "s2"
        }));

        let err = service
            .edit::<UsersResource, _>(&session, &route, "u9", &json!({ "fullName": "X" }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden { action: Action::Edit, .. }));
        assert_eq!(gateway.calls().len(), 1);
        assert_eq!(gateway.last_call().path, "/api/users/u9");

        gateway
            .reply(json!({
                "_id": "u8", "fullName": "Lia", "email": "l@s.com", "role": "tech", "store": "s1"
            }))
            .reply(json!({ "_id": "u8" }))
            .reply(json!([]));
        service
            .delete::<UsersResource>(&session, &route, "u8")
            .await
            .unwrap();

        let calls = gateway.calls();
        assert_eq!(calls[2].method, HttpMethod::Delete);
        assert_eq!(calls[2].path, "/api/users/u8");
        assert_eq!(gateway.last_call().path, "/api/users/store/s1");
    }

    #[tokio::test]
    async fn tech_candidates_stay_inside_own_store() {
        let (gateway, service, session) = setup(Role::StoreAdmin, Some("s1")).await;

        let err = service.tech_users(&session, "s2").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { section: Section::Categories, .. }));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn super_admin_home_is_the_welcome_panel() {
        let (gateway, service, session) = setup(Role::SuperAdmin, None).await;
        let home = service.home(&session).await.unwrap();
        assert!(matches!(home, HomeView::Welcome { full_name } if full_name == "Ana"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn tech_sees_overview_only_for_assigned_categories() {
        let (gateway, service, session) = setup(Role::Tech, Some("s1")).await;
        gateway
            .reply(json!({ "_id": "c1", "name": "Celulares" }))
            .reply(json!({ "_id": "c2", "name": "Tablets" }));

        let assigned = service
            .detail::<CategoriesResource>(&session, &RouteContext::parse("/categories/view/c1"), "c1")
            .await
            .unwrap();
        assert_eq!(assigned.tabs[0], Tab::Overview);
        assert!(assigned.actions.contains(Action::Edit));

        let other = service
            .detail::<CategoriesResource>(&session, &RouteContext::parse("/categories/view/c2"), "c2")
            .await
            .unwrap();
        assert!(!other.tabs.contains(&Tab::Overview));
        assert!(!other.actions.contains(Action::Edit));
    }

    #[tokio::test]
    async fn forbidden_actions_never_reach_the_backend() {
        let (gateway, service, session) = setup(Role::Salesman, Some("s1")).await;

        let err = service
            .add::<ProductsResource, _>(&session, &RouteContext::parse("/products"), &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden { action: Action::Add, .. }));

        let err = service
            .list::<SubStoresResource>(&session, &RouteContext::parse("/stores/view/s1"), QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn session_rejection_evicts_the_console_state() {
        let gateway = Arc::new(FakeGateway::new());
        let registry = ConsoleRegistry::new();
        let session = registry.insert("tok", principal(Role::LeadTech, Some("s1"))).await;
        let service = ConsoleService::new(gateway.clone(), registry.clone());
        gateway.fail(401, "jwt expired");

        let err = service
            .list::<ProductsResource>(&session, &RouteContext::parse("/products"), QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SessionInvalid));
        assert!(registry.get("tok").await.is_none());
    }

    #[test]
    fn route_actions_follow_the_route() {
        let tech = principal(Role::Tech, Some("s1"));

        let assigned = route_actions(&tech, &RouteContext::parse("/categories/view/c1"));
        assert_eq!(assigned.section, Section::Categories);
        assert!(assigned.actions.contains(Action::Edit));
        assert_eq!(assigned.tabs[0], Tab::Overview);

        let list = route_actions(&tech, &RouteContext::parse("/categories"));
        assert_eq!(list.actions, ActionSet::of(&[Action::List]));
        assert!(list.tabs.is_empty());

        let admin = principal(Role::StoreAdmin, Some("s1"));
        let home = route_actions(&admin, &RouteContext::parse("/"));
        assert_eq!(home.actions, ActionSet::of(&[Action::StoreDashboard]));
    }

    #[tokio::test]
    async fn tech_candidates_only_carry_the_tech_role() {
        let (gateway, service, session) = setup(Role::StoreAdmin, Some("s1")).await;
        gateway.reply(json!([
            { "_id": "u1", "fullName": "Ana", "email": "a@s.com", "role": "tech" },
            { "_id": "u2", "fullName": "Bia", "email": "b@s.com", "role": "salesman" },
            { "_id": "u3", "fullName": "Caio", "email": "c@s.com", "role": "lead-tech" }
        ]));

        let techs = service.tech_users(&session, "s1").await.unwrap();
        assert_eq!(gateway.last_call().path, "/api/users/store/s1");
        assert_eq!(techs.len(), 1);
        assert_eq!(techs[0].id, "u1");
        assert!(techs.iter().all(|row| row.record.role == Role::Tech));
    }
}
