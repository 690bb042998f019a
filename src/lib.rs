//! Tinylink - A small URL shortening service
//!
//! Shortens URLs, redirects visitors, counts clicks per referrer and keeps
//! everything in a single JSON document on disk.
//!
//! # Architecture
//! - `storage`: In-memory database, JSON file persistence
//! - `services`: Link business logic (shorten, redirect, stats, cleanup)
//! - `api`: HTTP services and middleware
//! - `interfaces`: Offline CLI commands
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
