// src/services/views.rs

use serde::Serialize;

use crate::{
    common::{error::StoreError, query::QueryParams},
    models::{listing::Row, store::Store},
    policy::{ActionSet, Tab},
    services::entity_store::LoadStatus,
};

// ---
// Lista
// ---
#[derive(Debug, Serialize)]
pub struct RowView<T: Serialize> {
    #[serde(flatten)]
    pub row: Row<T>,
    // Ações desta linha, calculadas com a posse do próprio registro
    pub actions: ActionSet,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<T: Serialize> {
    pub status: LoadStatus,
    pub rows: Vec<RowView<T>>,
    pub total: u64,
    pub params: QueryParams,
    // Ações da página (ex.: botão "adicionar")
    pub actions: ActionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StoreError>,
}

// ---
// Detalhe
// ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub message: String,
    pub back_link: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView<T: Serialize> {
    pub status: LoadStatus,
    pub record: Option<T>,
    pub tabs: Vec<Tab>,
    pub actions: ActionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StoreError>,
}

// ---
// Home
// ---
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HomeView {
    Welcome {
        #[serde(rename = "fullName")]
        full_name: String,
    },
    StoreDashboard {
        store: DetailView<Store>,
    },
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Action;
    use serde_json::json;

    #[test]
    fn home_view_is_tagged_by_kind() {
        let welcome = HomeView::Welcome {
            full_name: "Ana".into(),
        };
        assert_eq!(
            serde_json::to_value(&welcome).unwrap(),
            json!({ "kind": "welcome", "fullName": "Ana" })
        );
        assert_eq!(serde_json::to_value(HomeView::Empty).unwrap(), json!({ "kind": "empty" }));
    }

    #[test]
    fn detail_view_skips_absent_alert_and_error() {
        let view = DetailView::<Store> {
            status: LoadStatus::Loaded,
            record: None,
            tabs: Vec::new(),
            actions: ActionSet::of(&[Action::View]),
            alert: None,
            error: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["actions"], json!(["view"]));
        assert!(json.get("alert").is_none());
        assert!(json.get("error").is_none());
    }
}
