// src/services/password.rs

use bcrypt::{hash_with_salt, Version};

use crate::common::error::AppError;

/// Pré-hash das senhas antes de irem para a API remota.
///
/// Com salt configurado, a mesma senha gera sempre o mesmo hash (bcrypt `$2b$`);
/// sem salt, a senha segue como veio.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    salt: Option<[u8; 16]>,
    cost: u32,
}

impl PasswordHasher {
    pub fn new(salt: Option<[u8; 16]>, cost: u32) -> Self {
        Self { salt, cost }
    }

    pub fn is_enabled(&self) -> bool {
        self.salt.is_some()
    }

    pub async fn prepare(&self, password: &str) -> Result<String, AppError> {
        let Some(salt) = self.salt else {
            return Ok(password.to_string());
        };

        // bcrypt é CPU-bound: fora do runtime
        let password = password.to_owned();
        let cost = self.cost;
        let parts = tokio::task::spawn_blocking(move || hash_with_salt(&password, cost, salt))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        Ok(parts.format_for_version(Version::TwoB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn salted_hash_is_deterministic() {
        let hasher = PasswordHasher::new(Some([7u8; 16]), 4);
        let first = hasher.prepare("segredo123").await.unwrap();
        let second = hasher.prepare("segredo123").await.unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("$2b$04$"));
        assert_ne!(first, hasher.prepare("outra").await.unwrap());
    }

    #[tokio::test]
    async fn without_salt_the_password_passes_through() {
        let hasher = PasswordHasher::new(None, 10);
        assert!(!hasher.is_enabled());
        assert_eq!(hasher.prepare("segredo123").await.unwrap(), "segredo123");
    }
}
