// src/policy/guard.rs

use serde::Serialize;

use crate::models::principal::{Principal, Role};
use crate::policy::route::RouteContext;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";
pub const STORE_REGISTRATION_ROUTE: &str = "/register/store";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Guard {
    Allow,
    Redirect { to: String },
}

impl Guard {
    fn redirect(to: &str) -> Self {
        Guard::Redirect { to: to.to_string() }
    }
}

/// Para onde mandar uma conta sem loja.
///
/// store-admin recém-registrado vai cadastrar a loja; super-admin não precisa
/// de loja; qualquer outro cargo sem loja é conta órfã e volta ao login.
pub fn missing_store_redirect(principal: &Principal) -> Option<&'static str> {
    if principal.store.is_some() {
        return None;
    }
    match principal.role {
        Role::SuperAdmin => None,
        Role::StoreAdmin => Some(STORE_REGISTRATION_ROUTE),
        _ => Some(LOGIN_ROUTE),
    }
}

pub fn guard(principal: Option<&Principal>, route: &RouteContext) -> Guard {
    let Some(principal) = principal else {
        return if route.is_public() { Guard::Allow } else { Guard::redirect(LOGIN_ROUTE) };
    };

    if let Some(target) = missing_store_redirect(principal) {
        return if route.path() == target { Guard::Allow } else { Guard::redirect(target) };
    }

    if route.is_public() {
        return Guard::redirect(HOME_ROUTE);
    }

    Guard::Allow
}
