//! Generation services: provider client and orchestrator

pub mod orchestrator;
pub mod provider;
