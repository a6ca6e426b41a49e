// src/models/category.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::listing::Identified;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[schema(example = "Celulares")]
    pub name: String,

    // Técnico responsável pela categoria
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub subcategories: Vec<String>,

    #[serde(default)]
    pub store: Option<String>,
}

impl Identified for Category {
    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[validate(length(min = 1, message = "O nome da categoria é obrigatório."))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default)]
    pub subcategories: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
}
