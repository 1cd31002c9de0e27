//! HTTP API handlers

pub mod countries;
pub mod health;
pub mod seminars;

pub use countries::list_countries;
pub use health::health_routes;
pub use seminars::{create_seminar, delete_seminar, get_seminar, list_seminars, update_seminar};
