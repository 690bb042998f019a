//! HTTP API: handlers, DTOs and middleware

pub mod helpers;
pub mod middleware;
pub mod services;
pub mod types;
