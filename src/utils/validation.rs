use crate::utils::error::{ComplianceError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_bind_addr(field_name: &str, addr: &str) -> Result<()> {
    addr.parse::<std::net::SocketAddr>()
        .map(|_| ())
        .map_err(|e| ComplianceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_database_url(field_name: &str, url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(ComplianceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url.to_string(),
            reason: "Database URL cannot be empty".to_string(),
        });
    }

    if !url.starts_with("sqlite:") {
        return Err(ComplianceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url.to_string(),
            reason: "Only sqlite: URLs are supported".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number<T>(field_name: &str, value: T, min_value: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min_value {
        return Err(ComplianceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ComplianceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

// Request-level checks below report ValidationError so the HTTP layer answers 400.

pub fn validate_ship_id(ship_id: &str) -> Result<()> {
    if ship_id.trim().is_empty() {
        return Err(ComplianceError::validation(
            "Ship ID cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_year(year: i32) -> Result<()> {
    if !(2000..=2100).contains(&year) {
        return Err(ComplianceError::validation(format!(
            "Year {} is outside the supported range 2000-2100",
            year
        )));
    }
    Ok(())
}

pub fn validate_amount(field_name: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ComplianceError::validation(format!(
            "{} must be a positive number",
            field_name
        )));
    }
    Ok(())
}

/// Every ship may appear once; a repeated ship would count its balance twice.
pub fn validate_unique_ship_ids<'a, I>(ship_ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for ship_id in ship_ids {
        validate_ship_id(ship_id)?;
        if !seen.insert(ship_id) {
            return Err(ComplianceError::validation(format!(
                "Ship {} is listed more than once",
                ship_id
            )));
        }
    }
    Ok(())
}
