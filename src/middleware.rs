pub mod auth;
pub mod i18n;
pub mod request_id;
pub mod route;
