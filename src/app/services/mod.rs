pub mod banking;
pub mod compliance;
pub mod pooling;
pub mod routes;

pub use banking::BankingService;
pub use compliance::ComplianceService;
pub use pooling::PoolAllocator;
pub use routes::RouteService;
