pub mod actions;
pub mod guard;
pub mod route;

pub use actions::{detail_tabs, resolve_actions, Action, ActionSet, Ownership, Tab};
pub use guard::{guard, missing_store_redirect, Guard};
pub use route::{Page, RouteContext, Section};
