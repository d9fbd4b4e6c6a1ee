//! Shared utilities, configuration, and error handling for Studyforge
//!
//! This crate provides the pieces every other crate leans on:
//! - Configuration loaded from the environment
//! - The application error type and its HTTP mapping
//! - Repository error type shared by the store adapters
//! - Request extractors (validated JSON bodies, pagination)

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson};
