use crate::domain::model::{
    BankEntry, BankFilter, ComplianceRecord, NewBankEntry, NewRoute, PoolId, PoolMember, Route,
    StoredPool,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait ComplianceLookup: Send + Sync {
    async fn find_cb(&self, ship_id: &str, year: i32) -> Result<Option<ComplianceRecord>>;
}

#[async_trait]
pub trait ComplianceStore: ComplianceLookup {
    /// Inserts or replaces the record for `(ship_id, year)`.
    async fn upsert_cb(&self, record: &ComplianceRecord) -> Result<ComplianceRecord>;
}

#[async_trait]
pub trait PoolStore: Send + Sync {
    /// Writes the pool row, its total and all of its member rows as one unit.
    /// Either everything is stored or nothing is.
    async fn create_pool(
        &self,
        year: i32,
        total_cb: f64,
        members: &[PoolMember],
    ) -> Result<PoolId>;

    /// Returns the pool with the total exactly as it was stored.
    async fn find_pool(&self, pool_id: PoolId) -> Result<Option<StoredPool>>;
}

#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn list_routes(&self) -> Result<Vec<Route>>;
    async fn find_route(&self, id: i64) -> Result<Option<Route>>;
    async fn find_route_for_ship(&self, ship_id: &str, year: i32) -> Result<Option<Route>>;
    async fn find_baseline(&self) -> Result<Option<Route>>;
    /// Clears every baseline flag and sets it on `id`. Returns false when `id` does not exist.
    async fn set_baseline(&self, id: i64) -> Result<bool>;
    async fn upsert_route(&self, route: &NewRoute) -> Result<Route>;
}

#[async_trait]
pub trait BankLedger: Send + Sync {
    async fn append_entry(&self, entry: &NewBankEntry) -> Result<BankEntry>;
    async fn list_entries(&self, filter: &BankFilter) -> Result<Vec<BankEntry>>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn database_url(&self) -> &str;
    fn max_connections(&self) -> u32;
    fn request_timeout(&self) -> Duration;
}
