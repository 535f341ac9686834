//! Settings loader with multi-source merging

use super::settings::Settings;
use figment::{
    Figment,
    providers::{Env, Serialized},
};

/// Environment variable prefix for settings
pub const ENV_PREFIX: &str = "CONFKEEP_";

/// Settings loader that merges defaults and environment
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CONFKEEP_*` environment variables
    /// 2. Default values
    pub fn load() -> Result<Settings, Box<figment::Error>> {
        Self::extract(Self::figment())
    }

    /// The figment used by [`load`](Self::load)
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extract settings from an arbitrary figment
    pub fn extract(figment: Figment) -> Result<Settings, Box<figment::Error>> {
        figment.extract().map_err(Box::new)
    }

    /// Load only default settings
    pub fn load_defaults() -> Settings {
        Settings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_defaults() {
        let settings = SettingsLoader::load_defaults();
        assert!(settings.config_path.is_none());
        assert!(settings.interactive);
    }

    #[test]
    fn test_overrides_merge_over_defaults() {
        let figment = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Serialized::default("config_path", "/tmp/other.cfg"))
            .merge(Serialized::default("interactive", false));

        let settings = SettingsLoader::extract(figment).unwrap();
        assert_eq!(settings.config_path, Some(PathBuf::from("/tmp/other.cfg")));
        assert!(!settings.interactive);
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let figment = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Serialized::default("interactive", "sometimes"));
        assert!(SettingsLoader::extract(figment).is_err());
    }
}
