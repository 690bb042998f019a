//! Service layer for business logic
//!
//! Shared between the HTTP API and the CLI.

mod link_service;

pub use link_service::*;
