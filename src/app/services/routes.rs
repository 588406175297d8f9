use crate::domain::model::{ComparisonReport, Route, RouteComparison};
use crate::domain::ports::RouteRepository;
use crate::utils::error::{ComplianceError, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct RouteService {
    repo: Arc<dyn RouteRepository>,
}

impl RouteService {
    pub fn new(repo: Arc<dyn RouteRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Route>> {
        self.repo.list_routes().await
    }

    /// Makes `id` the only baseline route and returns it.
    pub async fn set_baseline(&self, id: i64) -> Result<Route> {
        let route = self
            .repo
            .find_route(id)
            .await?
            .ok_or_else(|| ComplianceError::not_found("Route", id))?;

        if !self.repo.set_baseline(id).await? {
            // deleted between the lookup and the update
            return Err(ComplianceError::not_found("Route", id));
        }

        tracing::info!("Route {} set as baseline", route.route_id);
        Ok(Route {
            is_baseline: true,
            ..route
        })
    }

    pub async fn compare(&self) -> Result<ComparisonReport> {
        let baseline = self
            .repo
            .find_baseline()
            .await?
            .ok_or_else(|| ComplianceError::not_found("Baseline route", "none set"))?;

        let routes = self.repo.list_routes().await?;
        Ok(compare_against_baseline(&baseline, &routes))
    }
}

pub fn compare_against_baseline(baseline: &Route, routes: &[Route]) -> ComparisonReport {
    let comparisons = routes
        .iter()
        .filter(|route| route.id != baseline.id)
        .map(|route| {
            let percent_diff = (route.ghg_intensity / baseline.ghg_intensity - 1.0) * 100.0;
            RouteComparison {
                route_id: route.route_id.clone(),
                baseline_intensity: baseline.ghg_intensity,
                comparison_intensity: route.ghg_intensity,
                percent_diff: round_to_cents(percent_diff),
                compliant: route.ghg_intensity <= baseline.ghg_intensity,
            }
        })
        .collect();

    ComparisonReport {
        baseline: baseline.route_id.clone(),
        baseline_intensity: baseline.ghg_intensity,
        comparisons,
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
