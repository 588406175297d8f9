pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{InMemoryRepository, SqliteRepository};
pub use app::services::{BankingService, ComplianceService, PoolAllocator, RouteService};
pub use app::AppServices;
pub use config::{toml_config::TomlConfig, CliConfig};
pub use core::server::ComplianceServer;
pub use utils::error::{ComplianceError, Result};
