//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Report calculation configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Report calculation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Markup applied to internal hourly cost when a project has no client
    /// rate. Business-tunable; the historical value is 1.3.
    #[serde(default = "default_hourly_cost_markup")]
    pub hourly_cost_markup: Decimal,
}

fn default_hourly_cost_markup() -> Decimal {
    Decimal::new(13, 1)
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            hourly_cost_markup: default_hourly_cost_markup(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("WORKLANE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
