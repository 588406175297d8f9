use crate::domain::model::{NewRoute, Route};
use crate::domain::ports::RouteRepository;
use crate::utils::error::{ComplianceError, Result};
use crate::utils::validation::{validate_ship_id, validate_year};
use std::io::Read;
use std::path::Path;

/// Reads route rows from CSV. The header must name the `NewRoute` fields
/// (`route_id,vessel_type,fuel_type,year,ghg_intensity,fuel_consumption,distance,total_emissions`).
pub fn read_routes<R: Read>(reader: R) -> Result<Vec<NewRoute>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut routes = Vec::new();
    for (index, row) in csv_reader.deserialize::<NewRoute>().enumerate() {
        let route = row?;
        validate_ship_id(&route.route_id).map_err(|e| row_error(index, e))?;
        validate_year(route.year).map_err(|e| row_error(index, e))?;
        if !route.ghg_intensity.is_finite() || route.ghg_intensity <= 0.0 {
            return Err(row_error(
                index,
                ComplianceError::validation("ghg_intensity must be positive"),
            ));
        }
        routes.push(route);
    }
    Ok(routes)
}

fn row_error(index: usize, err: ComplianceError) -> ComplianceError {
    // +2: one for the header, one for 1-based line numbers
    ComplianceError::validation(format!("Line {}: {}", index + 2, err.user_friendly_message()))
}

pub fn read_routes_file<P: AsRef<Path>>(path: P) -> Result<Vec<NewRoute>> {
    let file = std::fs::File::open(path)?;
    read_routes(file)
}

/// Upserts every route by its `route_id`.
pub async fn seed_routes<R>(repo: &R, routes: &[NewRoute]) -> Result<Vec<Route>>
where
    R: RouteRepository + ?Sized,
{
    let mut stored = Vec::with_capacity(routes.len());
    for route in routes {
        stored.push(repo.upsert_route(route).await?);
    }
    tracing::info!("Seeded {} routes", stored.len());
    Ok(stored)
}
