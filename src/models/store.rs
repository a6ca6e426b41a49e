// src/models/store.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::listing::Identified;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    Individual,
    Branch,
}

// ---
// 1. Store (A loja, ou uma sub-loja quando `parent` está preenchido)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[schema(example = "Storex Centro")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "Storex Comércio Ltda")]
    pub official_name: Option<String>,

    #[serde(default)]
    pub tax_id: Option<String>,

    pub store_type: StoreType,

    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,

    // Loja mãe (apenas sub-lojas)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Store {
    fn record_id(&self) -> &str {
        &self.id
    }
}

// ---
// 2. Payloads (O "Formulário" da loja)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorePayload {
    #[validate(length(min = 1, message = "O nome da loja é obrigatório."))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    pub store_type: StoreType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[validate(length(min = 6, message = "Telefone inválido."))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// Edição de sub-loja: o tipo fica travado depois da criação, por isso o campo não existe aqui.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubStoreUpdatePayload {
    #[validate(length(min = 1, message = "O nome da loja é obrigatório."))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[validate(length(min = 6, message = "Telefone inválido."))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sub_store_update_drops_store_type() {
        let payload: SubStoreUpdatePayload = serde_json::from_value(json!({
            "name": "Filial Norte",
            "storeType": "individual"
        }))
        .unwrap();

        let sent = serde_json::to_value(&payload).unwrap();
        assert_eq!(sent, json!({ "name": "Filial Norte" }));
    }

    #[test]
    fn empty_store_name_fails_validation() {
        let payload = StorePayload {
            name: String::new(),
            official_name: None,
            tax_id: None,
            store_type: StoreType::Branch,
            address: None,
            city: None,
            country: None,
            phone: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
