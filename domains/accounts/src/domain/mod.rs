//! Domain layer for Accounts

pub mod entities;
pub mod quota;
