// Application layer: use cases built on the domain ports.

pub mod services;

use crate::domain::ports::{BankLedger, ComplianceStore, PoolStore, RouteRepository};
use services::{BankingService, ComplianceService, PoolAllocator, RouteService};
use std::sync::Arc;

/// Every use case, wired to one backing repository.
#[derive(Clone)]
pub struct AppServices {
    pub routes: RouteService,
    pub compliance: ComplianceService,
    pub banking: BankingService,
    pub pooling: PoolAllocator,
}

impl AppServices {
    pub fn new<R>(repo: Arc<R>) -> Self
    where
        R: RouteRepository + ComplianceStore + BankLedger + PoolStore + 'static,
    {
        Self {
            routes: RouteService::new(repo.clone()),
            compliance: ComplianceService::new(repo.clone(), repo.clone(), repo.clone()),
            banking: BankingService::new(repo.clone()),
            pooling: PoolAllocator::new(repo.clone(), repo),
        }
    }
}
