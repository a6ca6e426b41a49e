// src/models/principal.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Os cargos conhecidos pelo console. O JSON usa kebab-case ("store-sub-admin").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SuperAdmin,
    StoreAdmin,
    StoreSubAdmin,
    LeadTech,
    Tech,
    Salesman,
    Accountant,
    Admin,
    User,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::SuperAdmin,
        Role::StoreAdmin,
        Role::StoreSubAdmin,
        Role::LeadTech,
        Role::Tech,
        Role::Salesman,
        Role::Accountant,
        Role::Admin,
        Role::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super-admin",
            Role::StoreAdmin => "store-admin",
            Role::StoreSubAdmin => "store-sub-admin",
            Role::LeadTech => "lead-tech",
            Role::Tech => "tech",
            Role::Salesman => "salesman",
            Role::Accountant => "accountant",
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

// ---
// Principal (O usuário autenticado)
// ---
// Valor imutável: substituído por inteiro a cada /auth/me, nunca editado campo a campo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    #[serde(rename = "_id", alias = "id")]
    #[schema(example = "64f1c2a9e4b0a1b2c3d4e5f6")]
    pub id: String,

    #[schema(example = "Maria Souza")]
    pub full_name: String,

    #[schema(example = "maria@storex.com")]
    pub email: String,

    pub role: Role,

    // Loja dona do usuário (None para super-admin ou conta ainda sem loja)
    #[serde(default)]
    pub store: Option<String>,

    #[serde(default)]
    pub sub_stores: Vec<String>,

    // Categorias atribuídas (técnicos)
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Principal {
    pub fn owns_store(&self, store_id: &str) -> bool {
        self.store.as_deref() == Some(store_id)
    }

    pub fn has_sub_store(&self, store_id: &str) -> bool {
        self.sub_stores.iter().any(|s| s == store_id)
    }

    pub fn is_assigned_to(&self, category_id: &str) -> bool {
        self.categories.iter().any(|c| c == category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_names_are_kebab_case() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }

    #[test]
    fn principal_reads_underscore_id_and_defaults() {
        let principal: Principal = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "fullName": "Ana",
            "email": "ana@storex.com",
            "role": "tech",
            "categories": ["c1"]
        }))
        .unwrap();

        assert_eq!(principal.id, "u1");
        assert_eq!(principal.store, None);
        assert!(principal.sub_stores.is_empty());
        assert!(principal.is_assigned_to("c1"));
        assert!(!principal.is_assigned_to("c2"));
    }
}
