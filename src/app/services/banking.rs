use crate::domain::model::{AppliedBanking, BankEntry, BankFilter, NewBankEntry};
use crate::domain::ports::BankLedger;
use crate::utils::error::{ComplianceError, Result};
use crate::utils::validation::{validate_amount, validate_ship_id, validate_year};
use std::sync::Arc;

/// Append-only ledger of banked surplus. Applying banked surplus books a
/// negative entry instead of editing earlier ones.
#[derive(Clone)]
pub struct BankingService {
    ledger: Arc<dyn BankLedger>,
}

impl BankingService {
    pub fn new(ledger: Arc<dyn BankLedger>) -> Self {
        Self { ledger }
    }

    pub async fn bank(&self, ship_id: &str, year: i32, amount: f64) -> Result<BankEntry> {
        validate_ship_id(ship_id)?;
        validate_year(year)?;
        validate_amount("amount", amount)?;

        let entry = self
            .ledger
            .append_entry(&NewBankEntry {
                ship_id: ship_id.to_string(),
                year,
                amount_gco2eq: amount,
            })
            .await?;

        tracing::info!("Banked {:.2} for {} ({})", amount, ship_id, year);
        Ok(entry)
    }

    /// The balance available to apply is the ship's ledger total across all years.
    pub async fn apply(&self, ship_id: &str, year: i32, amount: f64) -> Result<AppliedBanking> {
        validate_ship_id(ship_id)?;
        validate_year(year)?;
        validate_amount("amount", amount)?;

        let total_banked = self.banked_total(ship_id).await?;
        if amount > total_banked {
            return Err(ComplianceError::validation(format!(
                "Insufficient banked balance: requested {:.2}, available {:.2}",
                amount, total_banked
            )));
        }

        self.ledger
            .append_entry(&NewBankEntry {
                ship_id: ship_id.to_string(),
                year,
                amount_gco2eq: -amount,
            })
            .await?;

        tracing::info!("Applied {:.2} banked balance for {} ({})", amount, ship_id, year);
        Ok(AppliedBanking {
            applied: amount,
            remaining: total_banked - amount,
        })
    }

    pub async fn records(&self, filter: &BankFilter) -> Result<Vec<BankEntry>> {
        self.ledger.list_entries(filter).await
    }

    async fn banked_total(&self, ship_id: &str) -> Result<f64> {
        let filter = BankFilter {
            ship_id: Some(ship_id.to_string()),
            year: None,
        };
        let entries = self.ledger.list_entries(&filter).await?;
        Ok(entries.iter().map(|e| e.amount_gco2eq).sum())
    }
}
