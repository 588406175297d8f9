use clap::Parser;
use fueleu_compliance::core::ConfigProvider;
use fueleu_compliance::utils::error::{ComplianceError, ErrorSeverity};
use fueleu_compliance::utils::{logger, validation::Validate};
use fueleu_compliance::{AppServices, CliConfig, ComplianceServer, SqliteRepository, TomlConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let toml_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    match &toml_config {
        Some(config) if cli.json_logs || config.json_logs() => {
            logger::init_json_logger(config.log_level())
        }
        Some(config) => logger::init_cli_logger_with_level(cli.verbose, config.log_level()),
        None if cli.json_logs => logger::init_json_logger(None),
        None => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting fueleu-compliance");

    let result = match &toml_config {
        Some(config) => {
            tracing::info!("Using configuration from {:?}", cli.config);
            serve(config).await
        }
        None => serve(&cli).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn serve<C>(config: &C) -> Result<(), ComplianceError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    tracing::debug!(
        "bind_addr={} database_url={} max_connections={} request_timeout={:?}",
        config.bind_addr(),
        config.database_url(),
        config.max_connections(),
        config.request_timeout()
    );

    let repo = SqliteRepository::connect(config.database_url(), config.max_connections()).await?;
    let services = AppServices::new(Arc::new(repo));

    let server = ComplianceServer::from_config(services, config);
    let listener = ComplianceServer::bind(config.bind_addr()).await?;
    server.run(listener).await
}
