use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PoolId = i64;

/// Compliance balance of one ship for one compliance year, in gCO2e.
/// Positive is surplus, negative is deficit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecord {
    pub ship_id: String,
    pub year: i32,
    pub cb_gco2eq: f64,
}

impl ComplianceRecord {
    pub fn new(ship_id: impl Into<String>, year: i32, cb_gco2eq: f64) -> Self {
        Self {
            ship_id: ship_id.into(),
            year,
            cb_gco2eq,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolMemberRef {
    pub ship_id: String,
}

impl From<&str> for PoolMemberRef {
    fn from(ship_id: &str) -> Self {
        Self {
            ship_id: ship_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRequest {
    pub year: i32,
    pub members: Vec<PoolMemberRef>,
}

/// One member line of a pool: balance before and after reallocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolMember {
    pub ship_id: String,
    pub cb_before: f64,
    pub cb_after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolResult {
    pub pool_id: PoolId,
    pub year: i32,
    #[serde(rename = "totalCB")]
    pub total_cb: f64,
    pub members: Vec<PoolMember>,
}

/// A pool as read back from the store, with its creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPool {
    #[serde(flatten)]
    pub result: PoolResult,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: i64,
    pub route_id: String,
    pub vessel_type: String,
    pub fuel_type: String,
    pub year: i32,
    /// gCO2e/MJ
    pub ghg_intensity: f64,
    /// tonnes of fuel
    pub fuel_consumption: f64,
    /// km
    pub distance: f64,
    /// tonnes
    pub total_emissions: f64,
    pub is_baseline: bool,
}

/// Route data before it has a database id, as read from seed files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRoute {
    pub route_id: String,
    pub vessel_type: String,
    pub fuel_type: String,
    pub year: i32,
    pub ghg_intensity: f64,
    pub fuel_consumption: f64,
    pub distance: f64,
    pub total_emissions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteComparison {
    pub route_id: String,
    pub baseline_intensity: f64,
    pub comparison_intensity: f64,
    pub percent_diff: f64,
    pub compliant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub baseline: String,
    pub baseline_intensity: f64,
    pub comparisons: Vec<RouteComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankEntry {
    pub id: i64,
    pub ship_id: String,
    pub year: i32,
    pub amount_gco2eq: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBankEntry {
    pub ship_id: String,
    pub year: i32,
    pub amount_gco2eq: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankFilter {
    pub ship_id: Option<String>,
    pub year: Option<i32>,
}

impl BankFilter {
    pub fn matches(&self, entry: &BankEntry) -> bool {
        self.ship_id.as_deref().map_or(true, |id| id == entry.ship_id)
            && self.year.map_or(true, |year| year == entry.year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedBanking {
    pub applied: f64,
    pub remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedBalance {
    pub ship_id: String,
    pub year: i32,
    pub cb_gco2eq: f64,
    pub banked: f64,
    pub adjusted_cb: f64,
}
