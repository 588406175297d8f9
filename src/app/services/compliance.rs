use crate::domain::model::{AdjustedBalance, BankFilter, ComplianceRecord};
use crate::domain::ports::{BankLedger, ComplianceStore, RouteRepository};
use crate::utils::error::{ComplianceError, Result};
use crate::utils::validation::{validate_ship_id, validate_year};
use std::sync::Arc;

/// FuelEU target GHG intensity, gCO2e/MJ.
pub const TARGET_INTENSITY: f64 = 89.3368;
/// Lower heating value used to convert fuel mass to energy, MJ/t.
pub const ENERGY_PER_TONNE: f64 = 41_000.0;

/// `(target - actual) * energy`. Positive means the ship beat the target.
pub fn compliance_balance(ghg_intensity: f64, fuel_consumption_t: f64) -> f64 {
    let energy_mj = fuel_consumption_t * ENERGY_PER_TONNE;
    (TARGET_INTENSITY - ghg_intensity) * energy_mj
}

#[derive(Clone)]
pub struct ComplianceService {
    routes: Arc<dyn RouteRepository>,
    records: Arc<dyn ComplianceStore>,
    ledger: Arc<dyn BankLedger>,
}

impl ComplianceService {
    pub fn new(
        routes: Arc<dyn RouteRepository>,
        records: Arc<dyn ComplianceStore>,
        ledger: Arc<dyn BankLedger>,
    ) -> Self {
        Self {
            routes,
            records,
            ledger,
        }
    }

    /// Computes the balance from the ship's route for the year and stores it,
    /// replacing any earlier record for the same ship and year.
    pub async fn compute(&self, ship_id: &str, year: i32) -> Result<ComplianceRecord> {
        validate_ship_id(ship_id)?;
        validate_year(year)?;

        // route ids double as ship ids
        let route = self
            .routes
            .find_route_for_ship(ship_id, year)
            .await?
            .ok_or_else(|| ComplianceError::not_found("Route", format!("{ship_id}/{year}")))?;

        let cb = compliance_balance(route.ghg_intensity, route.fuel_consumption);
        tracing::debug!(
            "CB for {} in {}: intensity {} over {} t -> {:.2}",
            ship_id,
            year,
            route.ghg_intensity,
            route.fuel_consumption,
            cb
        );

        self.records
            .upsert_cb(&ComplianceRecord::new(route.route_id, route.year, cb))
            .await
    }

    /// Returns the stored record without recomputing it.
    pub async fn get(&self, ship_id: &str, year: i32) -> Result<ComplianceRecord> {
        validate_ship_id(ship_id)?;
        validate_year(year)?;

        self.records
            .find_cb(ship_id, year)
            .await?
            .ok_or_else(|| {
                ComplianceError::not_found("Compliance record", format!("{ship_id}/{year}"))
            })
    }

    /// Stored balance plus whatever the ship has banked for that year.
    pub async fn adjusted(&self, ship_id: &str, year: i32) -> Result<AdjustedBalance> {
        let record = self.get(ship_id, year).await?;

        let filter = BankFilter {
            ship_id: Some(ship_id.to_string()),
            year: Some(year),
        };
        let banked: f64 = self
            .ledger
            .list_entries(&filter)
            .await?
            .iter()
            .map(|e| e.amount_gco2eq)
            .sum();

        Ok(AdjustedBalance {
            ship_id: record.ship_id,
            year: record.year,
            cb_gco2eq: record.cb_gco2eq,
            banked,
            adjusted_cb: record.cb_gco2eq + banked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRepository;
    use crate::domain::model::{NewBankEntry, NewRoute};
    use crate::domain::ports::ComplianceLookup;

    fn route(route_id: &str, year: i32, ghg_intensity: f64, fuel: f64) -> NewRoute {
        NewRoute {
            route_id: route_id.to_string(),
            vessel_type: "Container".to_string(),
            fuel_type: "HFO".to_string(),
            year,
            ghg_intensity,
            fuel_consumption: fuel,
            distance: 12_000.0,
            total_emissions: 4_500.0,
        }
    }

    fn service(repo: &Arc<InMemoryRepository>) -> ComplianceService {
        ComplianceService::new(repo.clone(), repo.clone(), repo.clone())
    }

    #[test]
    fn test_compliance_balance_formula() {
        // 1 t at exactly the target intensity is neutral
        assert_eq!(compliance_balance(TARGET_INTENSITY, 1.0), 0.0);

        let cb = compliance_balance(88.3368, 2.0);
        assert!((cb - 82_000.0).abs() < 1e-6);

        assert!(compliance_balance(91.0, 5_000.0) < 0.0);
    }

    #[tokio::test]
    async fn test_compute_stores_record() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.upsert_route(&route("R002", 2024, 88.0, 4_800.0))
            .await
            .unwrap();

        let record = service(&repo).compute("R002", 2024).await.unwrap();

        let expected = (TARGET_INTENSITY - 88.0) * 4_800.0 * ENERGY_PER_TONNE;
        assert!((record.cb_gco2eq - expected).abs() < 1e-3);
        assert_eq!(repo.find_cb("R002", 2024).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_recompute_replaces_record() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.upsert_route(&route("R001", 2024, 91.0, 5_000.0))
            .await
            .unwrap();
        let service = service(&repo);

        service.compute("R001", 2024).await.unwrap();
        service.compute("R001", 2024).await.unwrap();

        assert_eq!(repo.compliance_count().await, 1);
    }

    #[tokio::test]
    async fn test_compute_without_route_is_not_found() {
        let repo = Arc::new(InMemoryRepository::new());

        let err = service(&repo).compute("R404", 2024).await.unwrap_err();
        assert!(matches!(err, ComplianceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_returns_stored_record_only() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.upsert_route(&route("R005", 2025, 90.5, 4_950.0))
            .await
            .unwrap();
        let service = service(&repo);

        let err = service.get("R005", 2025).await.unwrap_err();
        assert!(matches!(err, ComplianceError::NotFound { .. }));

        let computed = service.compute("R005", 2025).await.unwrap();
        assert_eq!(service.get("R005", 2025).await.unwrap(), computed);
    }

    #[tokio::test]
    async fn test_adjusted_adds_banked_for_year() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.upsert_cb(&ComplianceRecord::new("R003", 2025, -500.0))
            .await
            .unwrap();
        for (year, amount) in [(2025, 300.0), (2025, 100.0), (2024, 1_000.0)] {
            repo.append_entry(&NewBankEntry {
                ship_id: "R003".to_string(),
                year,
                amount_gco2eq: amount,
            })
            .await
            .unwrap();
        }

        let adjusted = service(&repo).adjusted("R003", 2025).await.unwrap();
        assert_eq!(adjusted.banked, 400.0);
        assert_eq!(adjusted.adjusted_cb, -100.0);
    }
}
