//! Duration arithmetic for phase templates.
//!
//! Template durations are entered as a (value, unit) pair and stored
//! as whole days. Formatting goes the other way and only promotes a
//! day count to a coarser unit when it divides exactly: template
//! durations are human-chosen round numbers, so no rounding happens.

use serde::{Deserialize, Serialize};

/// Errors from duration conversion.
#[derive(Debug, thiserror::Error)]
pub enum DurationError {
    /// Unit string not in the closed set.
    #[error("unknown duration unit: {0}")]
    InvalidUnit(String),

    /// Value is non-positive or the day count does not fit in `u32`.
    #[error("duration must be positive, got {0}")]
    InvalidValue(i64),
}

/// Duration input unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationUnit {
    /// Calendar days
    Days,
    /// 7-day weeks
    Weeks,
    /// 30-day months
    Months,
}

impl DurationUnit {
    /// Day count of one unit.
    pub fn day_factor(self) -> u32 {
        match self {
            DurationUnit::Days => 1,
            DurationUnit::Weeks => 7,
            DurationUnit::Months => 30,
        }
    }
}

impl std::str::FromStr for DurationUnit {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // French labels are what the data entry forms use.
        match s.to_ascii_lowercase().as_str() {
            "jours" | "jour" | "days" | "day" => Ok(DurationUnit::Days),
            "semaines" | "semaine" | "weeks" | "week" => Ok(DurationUnit::Weeks),
            "mois" | "months" | "month" => Ok(DurationUnit::Months),
            other => Err(DurationError::InvalidUnit(other.to_string())),
        }
    }
}

impl std::fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DurationUnit::Days => "jours",
            DurationUnit::Weeks => "semaines",
            DurationUnit::Months => "mois",
        };
        f.write_str(label)
    }
}

/// Convert a (value, unit) pair into whole days.
pub fn to_days(value: i64, unit: DurationUnit) -> Result<u32, DurationError> {
    if value <= 0 {
        return Err(DurationError::InvalidValue(value));
    }
    u32::try_from(value)
        .ok()
        .and_then(|v| v.checked_mul(unit.day_factor()))
        .ok_or(DurationError::InvalidValue(value))
}

/// Format a day count using the coarsest unit that divides it exactly.
pub fn format_duration(days: u32) -> String {
    if days >= 30 && days % 30 == 0 {
        format!("{} mois", days / 30)
    } else if days >= 7 && days % 7 == 0 {
        format!("{} semaines", days / 7)
    } else {
        format!("{} jours", days)
    }
}
