//! Application layer for confkeep
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    config_store::{ConfigStorePort, InMemoryConfigStore, StoreError, backup_path},
    prompt::{
        NonInteractivePrompt, PersistChoice, PromptCall, PromptError, PromptPort, ScriptedPrompt,
    },
};
pub use use_cases::migrate_config::{
    AppliedStep, MigrateConfigUseCase, MigrationError, MigrationFn, MigrationReport,
    MigrationStep, MigrationTable,
};
pub use use_cases::migrations::{default_migrations, imgur_api_change};
pub use use_cases::resolve_value::{ResolveError, ValueResolver};
