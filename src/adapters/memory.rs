use crate::domain::model::{
    BankEntry, BankFilter, ComplianceRecord, NewBankEntry, NewRoute, PoolId, PoolMember,
    PoolResult, Route, StoredPool,
};
use crate::domain::ports::{
    BankLedger, ComplianceLookup, ComplianceStore, PoolStore, RouteRepository,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    routes: BTreeMap<i64, Route>,
    compliance: HashMap<(String, i32), ComplianceRecord>,
    bank_entries: Vec<BankEntry>,
    pools: BTreeMap<PoolId, StoredPool>,
    next_route_id: i64,
    next_entry_id: i64,
    next_pool_id: PoolId,
}

/// Repository kept entirely in memory. Every write takes the lock once, so
/// readers never see a half-written pool.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn pool_count(&self) -> usize {
        self.state.read().await.pools.len()
    }

    pub async fn compliance_count(&self) -> usize {
        self.state.read().await.compliance.len()
    }
}

#[async_trait]
impl ComplianceLookup for InMemoryRepository {
    async fn find_cb(&self, ship_id: &str, year: i32) -> Result<Option<ComplianceRecord>> {
        let state = self.state.read().await;
        Ok(state.compliance.get(&(ship_id.to_string(), year)).cloned())
    }
}

#[async_trait]
impl ComplianceStore for InMemoryRepository {
    async fn upsert_cb(&self, record: &ComplianceRecord) -> Result<ComplianceRecord> {
        let mut state = self.state.write().await;
        state
            .compliance
            .insert((record.ship_id.clone(), record.year), record.clone());
        Ok(record.clone())
    }
}

#[async_trait]
impl PoolStore for InMemoryRepository {
    async fn create_pool(
        &self,
        year: i32,
        total_cb: f64,
        members: &[PoolMember],
    ) -> Result<PoolId> {
        let mut state = self.state.write().await;
        state.next_pool_id += 1;
        let pool_id = state.next_pool_id;
        state.pools.insert(
            pool_id,
            StoredPool {
                result: PoolResult {
                    pool_id,
                    year,
                    total_cb,
                    members: members.to_vec(),
                },
                created_at: Utc::now(),
            },
        );
        Ok(pool_id)
    }

    async fn find_pool(&self, pool_id: PoolId) -> Result<Option<StoredPool>> {
        Ok(self.state.read().await.pools.get(&pool_id).cloned())
    }
}

#[async_trait]
impl RouteRepository for InMemoryRepository {
    async fn list_routes(&self) -> Result<Vec<Route>> {
        Ok(self.state.read().await.routes.values().cloned().collect())
    }

    async fn find_route(&self, id: i64) -> Result<Option<Route>> {
        Ok(self.state.read().await.routes.get(&id).cloned())
    }

    async fn find_route_for_ship(&self, ship_id: &str, year: i32) -> Result<Option<Route>> {
        let state = self.state.read().await;
        Ok(state
            .routes
            .values()
            .find(|r| r.route_id == ship_id && r.year == year)
            .cloned())
    }

    async fn find_baseline(&self) -> Result<Option<Route>> {
        let state = self.state.read().await;
        Ok(state.routes.values().find(|r| r.is_baseline).cloned())
    }

    async fn set_baseline(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.routes.contains_key(&id) {
            return Ok(false);
        }
        for route in state.routes.values_mut() {
            route.is_baseline = route.id == id;
        }
        Ok(true)
    }

    async fn upsert_route(&self, route: &NewRoute) -> Result<Route> {
        let mut state = self.state.write().await;

        let existing = state
            .routes
            .values()
            .find(|r| r.route_id == route.route_id)
            .map(|r| (r.id, r.is_baseline));
        let (id, is_baseline) = match existing {
            Some(found) => found,
            None => {
                state.next_route_id += 1;
                (state.next_route_id, false)
            }
        };

        let stored = Route {
            id,
            route_id: route.route_id.clone(),
            vessel_type: route.vessel_type.clone(),
            fuel_type: route.fuel_type.clone(),
            year: route.year,
            ghg_intensity: route.ghg_intensity,
            fuel_consumption: route.fuel_consumption,
            distance: route.distance,
            total_emissions: route.total_emissions,
            is_baseline,
        };
        state.routes.insert(id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl BankLedger for InMemoryRepository {
    async fn append_entry(&self, entry: &NewBankEntry) -> Result<BankEntry> {
        let mut state = self.state.write().await;
        state.next_entry_id += 1;
        let stored = BankEntry {
            id: state.next_entry_id,
            ship_id: entry.ship_id.clone(),
            year: entry.year,
            amount_gco2eq: entry.amount_gco2eq,
            created_at: Utc::now(),
        };
        state.bank_entries.push(stored.clone());
        Ok(stored)
    }

    async fn list_entries(&self, filter: &BankFilter) -> Result<Vec<BankEntry>> {
        let state = self.state.read().await;
        Ok(state
            .bank_entries
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}
