//! Article 21 pooling: ships aggregate their compliance balances so that the
//! surplus of some members covers the deficit of others.
//!
//! Allocation is greedy. Members are ordered by their original balance,
//! highest first (ties keep request order), and every deficit ship in that
//! order draws from the surplus ships in that order until it is covered.
//! The order only decides which donor pays for which deficit; the pool total
//! is conserved either way.
//!
//! Balances are `f64`. A covered deficit and a drained donor are set to
//! exactly zero; otherwise the pool sums before and after agree to within
//! floating point rounding, relative to the gross balance of the pool.

use crate::domain::model::{
    ComplianceRecord, PoolId, PoolMember, PoolMemberRef, PoolRequest, PoolResult, StoredPool,
};
use crate::domain::ports::{ComplianceLookup, PoolStore};
use crate::utils::error::{ComplianceError, Result};
use crate::utils::validation::{validate_unique_ship_ids, validate_year};
use std::sync::Arc;

#[derive(Clone)]
pub struct PoolAllocator {
    lookup: Arc<dyn ComplianceLookup>,
    store: Arc<dyn PoolStore>,
}

impl PoolAllocator {
    pub fn new(lookup: Arc<dyn ComplianceLookup>, store: Arc<dyn PoolStore>) -> Self {
        Self { lookup, store }
    }

    /// Validates the pool, reallocates balances and persists the result.
    ///
    /// All validation happens before the store is touched, so a rejected
    /// request never leaves a pool behind.
    pub async fn allocate(&self, year: i32, members: &[PoolMemberRef]) -> Result<PoolResult> {
        if members.is_empty() {
            return Err(ComplianceError::validation("A pool needs at least one member"));
        }
        validate_year(year)?;
        validate_unique_ship_ids(members.iter().map(|m| m.ship_id.as_str()))?;

        let mut records = Vec::with_capacity(members.len());
        let mut missing = Vec::new();
        for member in members {
            match self.lookup.find_cb(&member.ship_id, year).await? {
                Some(record) => records.push(record),
                None => missing.push(member.ship_id.as_str()),
            }
        }

        if records.len() != members.len() {
            return Err(ComplianceError::validation(format!(
                "Some members have no compliance data for {}: {}",
                year,
                missing.join(", ")
            )));
        }

        let total_cb = pool_total(&records);
        if total_cb < 0.0 {
            return Err(ComplianceError::validation(format!(
                "Total CB must be >= 0 for pooling (pool total is {:.2})",
                total_cb
            )));
        }

        let allocations = redistribute(&records);
        let pool_id = self.store.create_pool(year, total_cb, &allocations).await?;

        tracing::info!(
            "Created pool {} for {} with {} members, total CB {:.2}",
            pool_id,
            year,
            allocations.len(),
            total_cb
        );

        Ok(PoolResult {
            pool_id,
            year,
            total_cb,
            members: allocations,
        })
    }

    pub async fn create(&self, request: &PoolRequest) -> Result<PoolResult> {
        self.allocate(request.year, &request.members).await
    }

    pub async fn find(&self, pool_id: PoolId) -> Result<StoredPool> {
        self.store
            .find_pool(pool_id)
            .await?
            .ok_or_else(|| ComplianceError::not_found("Pool", pool_id))
    }
}

pub fn pool_total(records: &[ComplianceRecord]) -> f64 {
    records.iter().map(|r| r.cb_gco2eq).sum()
}

/// Moves surplus onto deficit ships and returns every member with its
/// before and after balance, highest original balance first.
///
/// The input records are not touched; the running balances live in the
/// returned lines.
pub fn redistribute(records: &[ComplianceRecord]) -> Vec<PoolMember> {
    let mut lines: Vec<PoolMember> = records
        .iter()
        .map(|r| PoolMember {
            ship_id: r.ship_id.clone(),
            cb_before: r.cb_gco2eq,
            cb_after: r.cb_gco2eq,
        })
        .collect();

    // sort_by is stable, so equal balances keep request order
    lines.sort_by(|a, b| b.cb_before.total_cmp(&a.cb_before));

    let surplus: Vec<usize> = (0..lines.len())
        .filter(|&i| lines[i].cb_before > 0.0)
        .collect();
    let deficit: Vec<usize> = (0..lines.len())
        .filter(|&i| lines[i].cb_before < 0.0)
        .collect();

    for &d in &deficit {
        for &s in &surplus {
            let available = lines[s].cb_after;
            if available <= 0.0 {
                continue;
            }

            let remaining = -lines[d].cb_after;
            if available >= remaining {
                lines[s].cb_after = available - remaining;
                lines[d].cb_after = 0.0;
                break;
            }

            lines[s].cb_after = 0.0;
            lines[d].cb_after += available;
        }
    }

    lines
}
