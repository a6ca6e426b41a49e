// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    common::i18n::I18nStore,
    gateway::GatewayError,
    middleware::i18n::Locale,
    policy::{guard::LOGIN_ROUTE, Action, Section},
};

// O separador que a API remota usa para dizer qual campo do formulário falhou
pub const FIELD_DELIMITER: &str = "/type:";
pub const FALLBACK_MESSAGE: &str = "Something Went Wrong! Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Validation,
    Fail,
    NotFound,
    SessionInvalid,
}

// ---
// StoreError (o erro normalizado dos stores de entidade)
// ---
// No fio continua { type, message, statusCode? }: `type` é o nome do campo para
// erros de validação e "fail" para todo o resto.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub field: Option<String>,
    pub message: String,
    pub status_code: Option<u16>,
}

impl StoreError {
    pub fn fail() -> Self {
        Self {
            kind: StoreErrorKind::Fail,
            field: None,
            message: FALLBACK_MESSAGE.to_string(),
            status_code: None,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: StoreErrorKind::Validation,
            field: Some(field.into()),
            message: message.into(),
            status_code: None,
        }
    }

    fn with_status(mut self, status: Option<u16>) -> Self {
        self.status_code = status;
        self
    }

    /// "Email already in use/type:email" vira erro do campo `email`;
    /// qualquer outra mensagem vira a falha genérica.
    pub fn from_message(message: &str, status: Option<u16>) -> Self {
        match message.split_once(FIELD_DELIMITER) {
            Some((text, field)) if !field.trim().is_empty() => {
                Self::validation(field.trim(), text.trim()).with_status(status)
            }
            _ => Self::fail().with_status(status),
        }
    }

    pub fn type_tag(&self) -> &str {
        match (&self.kind, &self.field) {
            (StoreErrorKind::Validation, Some(field)) => field,
            _ => "fail",
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == Some(404)
    }
}

impl From<GatewayError> for StoreError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Status { status: 401, .. } => Self {
                kind: StoreErrorKind::SessionInvalid,
                ..Self::fail().with_status(Some(401))
            },
            GatewayError::Status { status: 404, message } => {
                let normalized = Self::from_message(&message, Some(404));
                if normalized.kind == StoreErrorKind::Validation {
                    normalized
                } else {
                    Self {
                        kind: StoreErrorKind::NotFound,
                        ..normalized
                    }
                }
            }
            GatewayError::Status { status, message } => Self::from_message(&message, Some(status)),
            GatewayError::Unreachable(_) | GatewayError::Decode(_) => Self::fail(),
        }
    }
}

impl Serialize for StoreError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.status_code.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("StoreError", fields)?;
        state.serialize_field("type", self.type_tag())?;
        state.serialize_field("message", &self.message)?;
        if let Some(status) = self.status_code {
            state.serialize_field("statusCode", &status)?;
        }
        state.end()
    }
}

// ---
// AppError (erros do console inteiro)
// ---
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Erro da API remota: {0}")]
    Store(#[from] StoreError),

    #[error("Sem permissão para {action:?} em {section:?}")]
    Forbidden { section: Section, action: Action },

    #[error("Sessão inválida ou ausente")]
    SessionInvalid,

    #[error("Ação exige confirmação")]
    ConfirmationRequired,

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// A resposta HTTP de erro: { error, details? }
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: i18n.translate(lang, "validation"),
                    details: Some(json!(details)),
                }
            }
            AppError::Store(err) => store_error_response(err, lang, i18n),
            AppError::Forbidden { section, action } => {
                tracing::warn!(?section, ?action, "Ação negada pela política");
                ApiError {
                    status: StatusCode::FORBIDDEN,
                    error: i18n.translate(lang, "forbidden"),
                    details: None,
                }
            }
            AppError::SessionInvalid => session_invalid_response(lang, i18n),
            AppError::ConfirmationRequired => ApiError {
                status: StatusCode::CONFLICT,
                error: i18n.translate(lang, "confirmation_required"),
                details: None,
            },
            // Todos os outros erros viram 500; o detalhe só vai para o log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: i18n.translate(lang, "internal"),
                    details: None,
                }
            }
        }
    }
}

fn session_invalid_response(lang: &str, i18n: &I18nStore) -> ApiError {
    ApiError {
        status: StatusCode::UNAUTHORIZED,
        error: i18n.translate(lang, "session_invalid"),
        details: Some(json!({ "redirect": LOGIN_ROUTE })),
    }
}

fn store_error_response(err: &StoreError, lang: &str, i18n: &I18nStore) -> ApiError {
    match err.kind {
        // Erro de campo: a mensagem é da API remota, vai como veio
        StoreErrorKind::Validation => ApiError {
            status: StatusCode::BAD_REQUEST,
            error: err.message.clone(),
            details: Some(json!(err)),
        },
        StoreErrorKind::SessionInvalid => session_invalid_response(lang, i18n),
        StoreErrorKind::NotFound => ApiError {
            status: StatusCode::NOT_FOUND,
            error: i18n.translate(lang, "not_found"),
            details: Some(json!(err)),
        },
        StoreErrorKind::Fail => {
            let status = err
                .status_code
                .and_then(|code| StatusCode::from_u16(code).ok())
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            let message = i18n.translate(lang, "fail");
            ApiError {
                status,
                error: message.clone(),
                details: Some(json!({ "type": err.type_tag(), "message": message })),
            }
        }
    }
}

// Para middlewares e extratores, que não têm o idioma em mãos
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), I18nStore::builtin())
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_split_on_the_delimiter() {
        let err = StoreError::from_message("Email already in use/type:email", Some(400));
        assert_eq!(err.kind, StoreErrorKind::Validation);
        assert_eq!(err.field.as_deref(), Some("email"));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "type": "email", "message": "Email already in use", "statusCode": 400 })
        );
    }

    #[test]
    fn messages_without_delimiter_become_generic_failures() {
        let err = StoreError::from_message("boom", None);
        assert_eq!(err.type_tag(), "fail");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "type": "fail", "message": FALLBACK_MESSAGE })
        );
    }

    #[test]
    fn gateway_statuses_map_onto_the_taxonomy() {
        let unauthorized = StoreError::from(GatewayError::Status {
            status: 401,
            message: "jwt expired".into(),
        });
        assert_eq!(unauthorized.kind, StoreErrorKind::SessionInvalid);

        let missing = StoreError::from(GatewayError::Status {
            status: 404,
            message: "Store not found".into(),
        });
        assert_eq!(missing.kind, StoreErrorKind::NotFound);
        assert!(missing.is_not_found());
        assert_eq!(missing.type_tag(), "fail");

        let offline = StoreError::from(GatewayError::Unreachable("refused".into()));
        assert_eq!(offline.kind, StoreErrorKind::Fail);
        assert_eq!(offline.status_code, None);
    }

    #[test]
    fn api_error_localizes_generic_failures_only() {
        let pt = Locale("pt".into());
        let i18n = I18nStore::new();

        let generic = AppError::Store(StoreError::fail()).to_api_error(&pt, &i18n);
        assert_eq!(generic.status, StatusCode::BAD_GATEWAY);
        assert_eq!(generic.error, "Algo deu errado! Tente novamente mais tarde.");

        let field = AppError::Store(StoreError::from_message("Name taken/type:name", Some(409)))
            .to_api_error(&pt, &i18n);
        assert_eq!(field.status, StatusCode::BAD_REQUEST);
        assert_eq!(field.error, "Name taken");
    }
}
