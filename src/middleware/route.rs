// src/middleware/route.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::policy::RouteContext;

// O cabeçalho com a rota atual da interface ("/home/category", "/stores/view/abc"...)
pub const CONSOLE_ROUTE_HEADER: &str = "x-console-route";

// A mesma tela é usada em rotas diferentes; sem o cabeçalho, cada handler usa a sua rota padrão.
#[derive(Debug, Clone)]
pub struct ConsoleRoute(pub Option<RouteContext>);

impl ConsoleRoute {
    pub fn or_default(self, default: &str) -> RouteContext {
        self.0.unwrap_or_else(|| RouteContext::parse(default))
    }
}

impl<S> FromRequestParts<S> for ConsoleRoute
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let route = parts
            .headers
            .get(CONSOLE_ROUTE_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty())
            .map(RouteContext::parse);

        Ok(ConsoleRoute(route))
    }
}
