//! API layer for the Learning domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::LearningState;
pub use routes::routes;
