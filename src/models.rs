pub mod auth;
pub mod category;
pub mod listing;
pub mod principal;
pub mod product;
pub mod store;
pub mod user;
