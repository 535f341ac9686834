//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for confkeep
#[derive(Parser, Debug)]
#[command(name = "confkeep")]
#[command(author, version, about = "Versioned configuration store with interactive fallback")]
#[command(long_about = r#"
confkeep keeps per-user configuration in a single private file and asks for
values that are missing.

When a registered option has no stored value you are prompted for it
(secrets without echo). Some options ask before saving the answer:
  y   save it (default)
  n   use it this time only
  nr  use it this time and never offer to save it again

The store lives at (in priority order):
1. --config <path>
2. $CONFKEEP_CONFIG_PATH
3. ~/.config/confkeep/confkeep.cfg

Older stores are migrated to the current schema on startup; a timestamped
backup is written next to the store first.

Example:
  confkeep get Tracker username
  confkeep set Tmdb api_key 0123456789abcdef
  confkeep forget General token
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration store
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Never prompt; fail instead when a value is missing
    #[arg(long, global = true)]
    pub no_input: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Store operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print a value, prompting for it if it is missing
    Get {
        section: String,
        option: String,

        /// Print this instead of prompting when the value is missing
        #[arg(long, value_name = "VALUE")]
        default: Option<String>,
    },

    /// Store a value
    Set {
        section: String,
        option: String,
        value: String,
    },

    /// Always ask for this option and never store it
    Forget { section: String, option: String },

    /// Remove a whole section
    UnsetSection { section: String },

    /// Show the result of the startup schema migration
    Migrate {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the store location
    Path,

    /// Print all stored sections and options (secrets masked)
    List,

    /// Print the options that can be prompted for
    Registry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get_with_default() {
        let cli = Cli::try_parse_from(["confkeep", "get", "Imgur", "client_id", "--default", ""])
            .unwrap();
        assert_eq!(
            cli.command,
            Command::Get {
                section: "Imgur".into(),
                option: "client_id".into(),
                default: Some(String::new()),
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "confkeep",
            "list",
            "--config",
            "/tmp/c.cfg",
            "--no-input",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::List);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.cfg")));
        assert!(cli.no_input);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_unset_section() {
        let cli = Cli::try_parse_from(["confkeep", "unset-section", "Imgur"]).unwrap();
        assert_eq!(
            cli.command,
            Command::UnsetSection {
                section: "Imgur".into()
            }
        );
    }

    #[test]
    fn test_set_requires_value() {
        assert!(Cli::try_parse_from(["confkeep", "set", "General", "token"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["confkeep"]).is_err());
    }
}
