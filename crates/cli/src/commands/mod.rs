pub mod chat;
pub mod doctor;
pub mod onboard;
pub mod tools;

use localagent_config::{AppConfig, ConfigError};

/// Per-invocation overrides from command-line flags.
#[derive(Debug, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl Overrides {
    /// Apply on top of `config`, then re-validate.
    pub fn apply(&self, mut config: AppConfig) -> Result<AppConfig, ConfigError> {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Load the config file and environment, then apply flag overrides.
pub fn load_config(overrides: &Overrides) -> Result<AppConfig, ConfigError> {
    overrides.apply(AppConfig::load()?)
}
