//! CLI entrypoint for confkeep
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use confkeep_application::{
    ConfigStorePort, MigrateConfigUseCase, NonInteractivePrompt, PromptPort, ValueResolver,
    default_migrations,
};
use confkeep_domain::{OptionRegistry, known_options};
use confkeep_infrastructure::{FileConfigStore, SettingsLoader, StorageLocation};
use confkeep_presentation::{Cli, Command, ConsoleFormatter, TerminalPrompt};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings =
        SettingsLoader::load().map_err(|e| anyhow!("Failed to load settings: {}", e))?;
    debug!(?settings, "Loaded settings");

    let explicit = cli.config.as_deref().or(settings.config_path.as_deref());
    let path = StorageLocation::resolve(explicit)
        .context("No per-user configuration directory found; use --config <PATH>")?;
    StorageLocation::prepare(&path)?;
    info!("Using config store {}", path.display());

    // === Dependency Injection ===
    let store = FileConfigStore::open(&path)?;
    let registry = OptionRegistry::from_known(known_options());

    if settings.interactive && !cli.no_input {
        run(cli.command, store, TerminalPrompt::stdio(), registry)
    } else {
        run(cli.command, store, NonInteractivePrompt, registry)
    }
}

fn run<S, P>(command: Command, store: S, prompt: P, registry: OptionRegistry) -> Result<()>
where
    S: ConfigStorePort,
    P: PromptPort,
{
    let mut resolver = ValueResolver::new(store, prompt, registry);

    // Bring the store to the current schema before anything reads it
    let migration = MigrateConfigUseCase::new(default_migrations()?);
    let report = migration.execute(&mut resolver)?;

    match command {
        Command::Get {
            section,
            option,
            default,
        } => {
            let value = resolver.resolve(&section, &option, default.as_deref())?;
            println!("{}", value);
        }
        Command::Set {
            section,
            option,
            value,
        } => {
            resolver.set(&section, &option, &value)?;
        }
        Command::Forget { section, option } => {
            resolver.forget(&section, &option)?;
        }
        Command::UnsetSection { section } => {
            if !resolver.remove_section(&section)? {
                eprintln!("No section named {}", section);
            }
        }
        Command::Migrate { json } => {
            let output = if json {
                ConsoleFormatter::format_report_json(&report)
            } else {
                ConsoleFormatter::format_report(&report)
            };
            println!("{}", output.trim_end());
        }
        Command::Path => {
            println!("{}", resolver.store().location().display());
        }
        Command::List => {
            resolver.store_mut().reload()?;
            print!(
                "{}",
                ConsoleFormatter::format_document(
                    resolver.store().document(),
                    resolver.registry()
                )
            );
        }
        Command::Registry => {
            print!("{}", ConsoleFormatter::format_registry(resolver.registry()));
        }
    }

    Ok(())
}
