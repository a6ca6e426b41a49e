pub mod client_state;
pub mod console_service;
pub mod console_state;
pub mod entity_store;
pub mod password;
pub mod resources;
pub mod session_service;
pub mod views;
