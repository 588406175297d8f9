use clap::Parser;
use fueleu_compliance::adapters::seed::{read_routes_file, seed_routes};
use fueleu_compliance::config::DEFAULT_DATABASE_URL;
use fueleu_compliance::core::RouteRepository;
use fueleu_compliance::utils::logger;
use fueleu_compliance::SqliteRepository;

#[derive(Parser)]
#[command(name = "seed-routes")]
#[command(about = "Load route data from a CSV file into the compliance database")]
struct Args {
    /// CSV file with one route per line
    #[arg(short, long, default_value = "data/routes.csv")]
    file: String,

    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Mark this route id as the comparison baseline after seeding
    #[arg(long)]
    baseline: Option<String>,

    /// Parse and validate the file without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Reading routes from {}", args.file);
    let routes = read_routes_file(&args.file)?;

    if args.dry_run {
        for route in &routes {
            println!(
                "{} {} {} {} intensity={} fuel={}t",
                route.route_id,
                route.year,
                route.vessel_type,
                route.fuel_type,
                route.ghg_intensity,
                route.fuel_consumption
            );
        }
        tracing::info!("🔍 DRY RUN - {} routes validated, nothing written", routes.len());
        return Ok(());
    }

    let repo = SqliteRepository::connect(&args.database_url, 1).await?;
    let stored = seed_routes(&repo, &routes).await?;

    if let Some(route_id) = &args.baseline {
        let Some(route) = stored.iter().find(|r| &r.route_id == route_id) else {
            anyhow::bail!("Baseline route {} is not in {}", route_id, args.file);
        };
        repo.set_baseline(route.id).await?;
        tracing::info!("Route {} set as baseline", route_id);
    }

    println!("✅ Seeded {} routes into {}", stored.len(), args.database_url);
    Ok(())
}
