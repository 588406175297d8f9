pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_bind_addr, validate_database_url, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://fueleu.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "fueleu-compliance"))]
#[cfg_attr(
    feature = "cli",
    command(about = "FuelEU Maritime compliance API: routes, banking and pooling")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, env = "FUELEU_BIND_ADDR", default_value = DEFAULT_BIND_ADDR))]
    pub bind_addr: String,

    #[cfg_attr(feature = "cli", arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL))]
    pub database_url: String,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS))]
    pub max_connections: u32,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECONDS))]
    pub request_timeout_seconds: u64,

    #[cfg_attr(
        feature = "cli",
        arg(long, help = "Load settings from a TOML file instead of flags")
    )]
    pub config: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON lines"))]
    pub json_logs: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            config: None,
            json_logs: false,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    fn database_url(&self) -> &str {
        &self.database_url
    }

    fn max_connections(&self) -> u32 {
        self.max_connections
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_bind_addr("bind_addr", &self.bind_addr)?;
        validate_database_url("database_url", &self.database_url)?;
        validate_positive_number("max_connections", self.max_connections, 1)?;
        validate_range("request_timeout_seconds", self.request_timeout_seconds, 1, 600)?;
        Ok(())
    }
}
