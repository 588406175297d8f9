pub mod server;

pub use crate::app::AppServices;
pub use crate::domain::model::{ComplianceRecord, PoolMember, PoolResult};
pub use crate::domain::ports::{
    BankLedger, ComplianceLookup, ComplianceStore, ConfigProvider, PoolStore, RouteRepository,
};
pub use crate::utils::error::Result;
