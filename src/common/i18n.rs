// src/common/i18n.rs

use std::collections::HashMap;
use std::sync::LazyLock;

const DEFAULT_LANG: &str = "en";

const EN: &[(&str, &str)] = &[
    ("fail", "Something Went Wrong! Please try again later."),
    ("validation", "One or more fields are invalid."),
    ("not_found", "The requested record was not found."),
    ("session_invalid", "Your session has expired. Please sign in again."),
    ("forbidden", "You are not allowed to perform this action."),
    ("confirmation_required", "This action must be confirmed before it runs."),
    ("internal", "An unexpected error occurred."),
];

const PT: &[(&str, &str)] = &[
    ("fail", "Algo deu errado! Tente novamente mais tarde."),
    ("validation", "Um ou mais campos são inválidos."),
    ("not_found", "O registro solicitado não foi encontrado."),
    ("session_invalid", "Sua sessão expirou. Entre novamente."),
    ("forbidden", "Você não tem permissão para realizar esta ação."),
    ("confirmation_required", "Esta ação precisa ser confirmada antes de executar."),
    ("internal", "Ocorreu um erro inesperado."),
];

static BUILTIN: LazyLock<I18nStore> = LazyLock::new(I18nStore::new);

// Mensagens genéricas por idioma. Mensagens de campo vêm da API remota e não são traduzidas.
#[derive(Debug)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        messages.insert("en", EN.iter().copied().collect());
        messages.insert("pt", PT.iter().copied().collect());
        Self { messages }
    }

    pub fn builtin() -> &'static I18nStore {
        &BUILTIN
    }

    /// Idioma desconhecido cai no inglês; chave desconhecida volta como está.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|table| table.get(key)))
            .map(|text| text.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_english_then_key() {
        let store = I18nStore::new();
        assert_eq!(store.translate("pt", "forbidden"), "Você não tem permissão para realizar esta ação.");
        assert_eq!(store.translate("de", "fail"), "Something Went Wrong! Please try again later.");
        assert_eq!(store.translate("en", "nope"), "nope");
    }
}
