// src/models/user.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{listing::Identified, principal::Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

// Representa um usuário vindo da API remota
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub full_name: String,

    pub email: String,

    #[serde(default, skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password: Option<String>,

    pub role: Role,

    #[serde(default)]
    pub gender: Option<Gender>,

    // A API às vezes manda data completa (ISO), às vezes só o dia: guardamos como veio.
    #[serde(default)]
    pub birthday: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub store: Option<String>,
}

impl Identified for User {
    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    // Só de escrita: nunca volta em nenhuma resposta do console
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
}
