//! Use cases (application services)
//!
//! Use cases orchestrate domain logic and coordinate with external systems
//! through ports.

pub mod migrate_config;
pub mod migrations;
pub mod resolve_value;
