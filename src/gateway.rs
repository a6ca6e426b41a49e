pub mod backend;
pub mod http_gateway;
#[cfg(test)]
pub mod fake;

pub use backend::{BackendAuth, BackendGateway, BackendRequest, GatewayError, HttpMethod};
pub use http_gateway::HttpGateway;
