// src/services/entity_store.rs

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    common::{
        error::StoreError,
        query::{strip_empty, QueryParams},
    },
    gateway::{
        backend::decode, BackendAuth, BackendGateway, BackendRequest, GatewayError,
    },
    models::{
        listing::{Identified, ListEnvelope, RecordEnvelope},
        principal::Principal,
    },
    policy::{Ownership, RouteContext, Section},
    services::console_state::ConsoleState,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

// Os caminhos REST de um recurso, já resolvidos para o cargo e a rota atuais
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub list: String,
    pub detail_base: String,
    pub related: Option<String>,
}

impl ResolvedPath {
    pub fn flat(base: &str) -> Self {
        Self {
            list: base.to_string(),
            detail_base: base.to_string(),
            related: None,
        }
    }

    pub fn detail(&self, id: &str) -> String {
        format!("{}/{}", self.detail_base, id)
    }
}

pub struct PathContext<'a> {
    pub principal: &'a Principal,
    pub route: &'a RouteContext,
}

/// Um recurso CRUD da API remota (lojas, sub-lojas, categorias, produtos, usuários).
///
/// Cada recurso diz como resolver os seus caminhos e como calcular os fatos de
/// posse usados pela política; o resto (fetch, add, edit, delete) é genérico.
pub trait Resource: Sized + Send + Sync + 'static {
    const NAME: &'static str;
    const SECTION: Section;

    type Record: Identified + Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    fn resolve_path(ctx: &PathContext<'_>) -> Result<ResolvedPath, StoreError>;

    fn slice(state: &mut ConsoleState) -> &mut EntityStore<Self>;

    // Posse no nível da página (lista, botão de adicionar)
    fn page_ownership(_principal: &Principal, _route: &RouteContext) -> Ownership {
        Ownership::default()
    }

    // Posse quando só temos o id do alvo
    fn id_ownership(principal: &Principal, route: &RouteContext, _id: &str) -> Ownership {
        Self::page_ownership(principal, route)
    }

    fn record_ownership(principal: &Principal, route: &RouteContext, record: &Self::Record) -> Ownership {
        Self::id_ownership(principal, route, record.record_id())
    }
}

// O "slice" de estado de um recurso: caminho, lista, total, registro atual, últimos filtros e último erro.
pub struct EntityStore<R: Resource> {
    path: Option<ResolvedPath>,
    list: Vec<R::Record>,
    total: u64,
    current: Option<R::Record>,
    params: QueryParams,
    error: Option<StoreError>,
    status: LoadStatus,
}

impl<R: Resource> Default for EntityStore<R> {
    fn default() -> Self {
        Self {
            path: None,
            list: Vec::new(),
            total: 0,
            current: None,
            params: QueryParams::new(),
            error: None,
            status: LoadStatus::Idle,
        }
    }
}

impl<R: Resource> EntityStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[R::Record] {
        &self.list
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn current(&self) -> Option<&R::Record> {
        self.current.as_ref()
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn find_cached(&self, id: &str) -> Option<&R::Record> {
        self.current
            .iter()
            .chain(self.list.iter())
            .find(|record| record.record_id() == id)
    }

    // Sempre antes de qualquer fetch: o caminho depende do cargo e da rota atuais
    pub fn resolve_path(&mut self, ctx: &PathContext<'_>) -> Result<(), StoreError> {
        let path = R::resolve_path(ctx)?;
        tracing::debug!(resource = R::NAME, route = ctx.route.path(), list = %path.list, "caminho resolvido");
        self.path = Some(path);
        Ok(())
    }

    fn resolved(&self) -> Result<ResolvedPath, StoreError> {
        self.path.clone().ok_or_else(|| {
            tracing::error!(resource = R::NAME, "operação antes de resolver o caminho");
            StoreError::fail()
        })
    }

    fn record_failure(&mut self, err: GatewayError) -> StoreError {
        let normalized = StoreError::from(err);
        tracing::warn!(
            resource = R::NAME,
            kind = ?normalized.kind,
            status = ?normalized.status_code,
            "falha na API remota"
        );
        self.error = Some(normalized.clone());
        self.status = LoadStatus::Errored;
        normalized
    }

    /// Troca lista, total e filtros. Filtros vazios não vão para a API, mas ficam guardados como vieram.
    pub async fn fetch(
        &mut self,
        gateway: &dyn BackendGateway,
        auth: &BackendAuth,
        params: QueryParams,
    ) -> Result<(), StoreError> {
        let path = self.resolved()?;
        self.status = LoadStatus::Loading;
        self.params = params;

        let request = BackendRequest::get(path.list)
            .with_query(strip_empty(&self.params))
            .with_auth(auth.clone());

        match gateway.send(request).await.and_then(decode::<ListEnvelope<R::Record>>) {
            Ok(envelope) => {
                let (list, total) = envelope.into_parts();
                tracing::debug!(resource = R::NAME, total, "lista carregada");
                self.list = list;
                self.total = total;
                self.error = None;
                self.status = LoadStatus::Loaded;
                Ok(())
            }
            Err(err) => Err(self.record_failure(err)),
        }
    }

    pub async fn fetch_one(
        &mut self,
        gateway: &dyn BackendGateway,
        auth: &BackendAuth,
        id: &str,
    ) -> Result<(), StoreError> {
        let path = self.resolved()?;
        self.status = LoadStatus::Loading;

        let request = BackendRequest::get(path.detail(id)).with_auth(auth.clone());

        match gateway.send(request).await.and_then(decode::<RecordEnvelope<R::Record>>) {
            Ok(envelope) => {
                self.current = Some(envelope.into_inner());
                self.error = None;
                self.status = LoadStatus::Loaded;
                Ok(())
            }
            Err(err) => {
                self.current = None;
                Err(self.record_failure(err))
            }
        }
    }

    pub async fn add<D>(
        &mut self,
        gateway: &dyn BackendGateway,
        auth: &BackendAuth,
        draft: &D,
    ) -> Result<Value, StoreError>
    where
        D: Serialize + Sync + ?Sized,
    {
        let path = self.resolved()?;
        let body = serde_json::to_value(draft).map_err(|_| StoreError::fail())?;
        self.mutate(gateway, auth, BackendRequest::post(path.list, body)).await
    }

    pub async fn edit<D>(
        &mut self,
        gateway: &dyn BackendGateway,
        auth: &BackendAuth,
        id: &str,
        draft: &D,
    ) -> Result<Value, StoreError>
    where
        D: Serialize + Sync + ?Sized,
    {
        let path = self.resolved()?;
        let body = serde_json::to_value(draft).map_err(|_| StoreError::fail())?;
        self.mutate(gateway, auth, BackendRequest::put(path.detail(id), body)).await
    }

    pub async fn delete(
        &mut self,
        gateway: &dyn BackendGateway,
        auth: &BackendAuth,
        id: &str,
    ) -> Result<Value, StoreError> {
        let path = self.resolved()?;
        let response = self
            .mutate(gateway, auth, BackendRequest::delete(path.detail(id)))
            .await?;

        if self.current.as_ref().is_some_and(|record| record.record_id() == id) {
            self.current = None;
        }
        Ok(response)
    }

    // Depois de toda mutação bem-sucedida, recarrega a lista com os últimos filtros (última escrita vence).
    async fn mutate(
        &mut self,
        gateway: &dyn BackendGateway,
        auth: &BackendAuth,
        request: BackendRequest,
    ) -> Result<Value, StoreError> {
        let method = request.method;
        let response = match gateway.send(request.with_auth(auth.clone())).await {
            Ok(response) => response,
            Err(err) => return Err(self.record_failure(err)),
        };
        tracing::info!(resource = R::NAME, ?method, "mutação concluída, recarregando lista");

        let params = self.params.clone();
        if let Err(err) = self.fetch(gateway, auth, params).await {
            tracing::warn!(resource = R::NAME, %err, "recarga após mutação falhou");
        }
        Ok(response)
    }
}
