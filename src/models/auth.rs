// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::principal::{Principal, Role};

// Dados para login
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// Dados para registro de um novo usuário (sempre vira store-admin)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    // Ignorado: o registro força `store-admin`
    #[serde(default, skip_serializing)]
    pub role: Option<Role>,
}

// O que vai para /jwt/register
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
}

// Resposta de /jwt/login e /jwt/register
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthEnvelope {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user_data: Principal,
}

// /auth/me responde { userData } ou o principal direto
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MeEnvelope {
    Wrapped {
        #[serde(rename = "userData")]
        user_data: Principal,
    },
    Bare(Principal),
}

impl MeEnvelope {
    pub fn into_principal(self) -> Principal {
        match self {
            MeEnvelope::Wrapped { user_data } => user_data,
            MeEnvelope::Bare(principal) => principal,
        }
    }
}

// Estrutura de dados ("claims") dentro do JWT. Só o `exp` interessa ao console.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub exp: Option<i64>,
}
