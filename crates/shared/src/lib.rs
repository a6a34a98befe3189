//! Shared configuration for Talentpool.
//!
//! This crate holds the application configuration loaded at startup and
//! handed to the server binary. Domain types live in `talentpool-core`.

pub mod config;

pub use config::AppConfig;
