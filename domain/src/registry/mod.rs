//! Option registry: per-key resolution policy.
//!
//! Every subsystem that needs a configuration value registers the key once
//! at startup, describing how to ask the user for it when the store has no
//! value. The assembled [`OptionRegistry`] is handed to the resolver and is
//! never mutated afterwards.

mod known_options;
mod policy;

pub use known_options::{KnownOption, known_options};
pub use policy::{OptionKey, OptionPolicy, OptionRegistry};
