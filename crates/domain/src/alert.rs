use crate::card::Card;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub const DEFAULT_WARNING_THRESHOLD_DAYS: i64 = 90;
pub const DEFAULT_CRITICAL_THRESHOLD_DAYS: i64 = 180;

/// How urgently a `Card` needs to be used again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTier {
    None,
    Warning,
    Critical,
}

impl AlertTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl Display for AlertTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown alert tier: {0}")]
pub struct InvalidAlertTierError(String);

impl FromStr for AlertTier {
    type Err = InvalidAlertTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            _ => Err(InvalidAlertTierError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidThresholdsError {
    #[error("Alert thresholds must be positive, got warning: {warning}, critical: {critical}")]
    NotPositive { warning: i64, critical: i64 },
    #[error("Critical threshold ({critical} days) must be greater than the warning threshold ({warning} days)")]
    CriticalNotAfterWarning { warning: i64, critical: i64 },
}

/// Number of inactive days at which a `Card` is alerted on.
/// Can only be constructed with `critical_days > warning_days > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertThresholds {
    warning_days: i64,
    critical_days: i64,
}

impl AlertThresholds {
    pub fn new(warning_days: i64, critical_days: i64) -> Result<Self, InvalidThresholdsError> {
        if warning_days <= 0 || critical_days <= 0 {
            return Err(InvalidThresholdsError::NotPositive {
                warning: warning_days,
                critical: critical_days,
            });
        }
        if critical_days <= warning_days {
            return Err(InvalidThresholdsError::CriticalNotAfterWarning {
                warning: warning_days,
                critical: critical_days,
            });
        }
        Ok(Self {
            warning_days,
            critical_days,
        })
    }

    pub fn warning_days(&self) -> i64 {
        self.warning_days
    }

    pub fn critical_days(&self) -> i64 {
        self.critical_days
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            warning_days: DEFAULT_WARNING_THRESHOLD_DAYS,
            critical_days: DEFAULT_CRITICAL_THRESHOLD_DAYS,
        }
    }
}

/// Decides which `AlertTier` a `Card` is in at `reference_date`.
///
/// A card is `Critical` from the critical threshold onwards, but only
/// `Warning` on the exact day it reaches the warning threshold. This way
/// the warning is sent once instead of on every run until the card turns
/// critical.
pub fn classify(card: &Card, reference_date: NaiveDate, thresholds: &AlertThresholds) -> AlertTier {
    let inactivity_days = match card.inactivity_days(reference_date) {
        Some(days) => days,
        None => return AlertTier::None,
    };

    if inactivity_days >= thresholds.critical_days {
        AlertTier::Critical
    } else if inactivity_days == thresholds.warning_days {
        AlertTier::Warning
    } else {
        AlertTier::None
    }
}
