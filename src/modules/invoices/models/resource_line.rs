// A resource line bills hours × rate alongside the invoice's primary
// quantity/rate line. Both figures accept the same raw input as the rest
// of the invoice form and are coerced through the numeric gateway.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{numeric_value, AppError, RawValue, Result};

/// Billable hours for one resource type
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceLine {
    /// Resource label, e.g. "Senior Engineer"
    #[serde(rename = "type", default)]
    pub resource_type: String,

    /// Hours worked
    #[serde(default)]
    pub hours: RawValue,

    /// Rate per hour
    #[serde(default)]
    pub rate: RawValue,
}

impl ResourceLine {
    pub fn new(
        resource_type: impl Into<String>,
        hours: impl Into<RawValue>,
        rate: impl Into<RawValue>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            hours: hours.into(),
            rate: rate.into(),
        }
    }

    /// Line amount: hours × rate
    pub fn amount(&self) -> Decimal {
        numeric_value(&self.hours)
            .checked_mul(numeric_value(&self.rate))
            .unwrap_or(Decimal::ZERO)
    }

    /// Validate hours and rate (both must be non-negative)
    ///
    /// `index` is the line's position, used in the error message
    pub fn validate(&self, index: usize) -> Result<()> {
        let hours = numeric_value(&self.hours);
        if hours < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Resource line {} hours must be non-negative, got: {}",
                index, hours
            )));
        }

        let rate = numeric_value(&self.rate);
        if rate < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Resource line {} rate must be non-negative, got: {}",
                index, rate
            )));
        }

        Ok(())
    }
}
