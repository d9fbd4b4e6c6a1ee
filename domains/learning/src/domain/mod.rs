//! Domain layer for the Learning domain

pub mod artifacts;
pub mod entities;
