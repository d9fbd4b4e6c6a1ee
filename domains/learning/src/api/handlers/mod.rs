//! HTTP handlers for the Learning domain

pub mod bundles;
pub mod generations;
