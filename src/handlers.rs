pub mod auth;
pub mod categories;
pub mod policy;
pub mod products;
pub mod stores;
pub mod sub_stores;
pub mod users;
