//! API endpoint integration tests
//!
//! Drives the composed router end to end with in-memory stores and the
//! programmable mock LLM: account usage, generation, bundle reads.
//! `postgres_store` runs the SQL repositories against a real database and
//! is ignored by default.

#![allow(dead_code)]

mod accounts_api;
mod bundles_api;
mod common;
mod generations_api;
mod postgres_store;
