//! Cell values that may be undefined
//!
//! Percentages over a zero denominator and statistics over an empty category
//! are explicit markers, never `NaN` or a fabricated zero.

use serde::Serialize;
use std::fmt;

/// Round to one decimal place, half away from zero
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A percentage, or undefined when its denominator is zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Percent {
    /// Percentage rounded to one decimal
    Value(f64),
    /// Denominator was zero
    Undefined,
}

impl Percent {
    /// `numerator / denominator * 100`, undefined when `denominator` is zero
    pub fn of(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            Percent::Undefined
        } else {
            Percent::Value(round1(numerator as f64 / denominator as f64 * 100.0))
        }
    }

    /// Like [`Percent::of`], but zero when either side is zero.
    ///
    /// Automation and false-positive rates use this so charts always have a bar.
    pub fn or_zero(numerator: u64, denominator: u64) -> Self {
        if numerator == 0 || denominator == 0 {
            Percent::Value(0.0)
        } else {
            Self::of(numerator, denominator)
        }
    }

    /// The value, if defined
    pub fn value(self) -> Option<f64> {
        match self {
            Percent::Value(v) => Some(v),
            Percent::Undefined => None,
        }
    }

    /// True when undefined
    pub fn is_undefined(self) -> bool {
        matches!(self, Percent::Undefined)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percent::Value(v) => write!(f, "{:.1}%", v),
            Percent::Undefined => f.write_str("undefined"),
        }
    }
}

/// A confidence statistic, or no data when its category is empty
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Stat {
    /// Statistic value
    Value(f64),
    /// No records in the category
    NoData,
}

impl Stat {
    /// True when the category had no records
    pub fn is_no_data(self) -> bool {
        matches!(self, Stat::NoData)
    }
}

impl From<Option<f64>> for Stat {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Stat::NoData, Stat::Value)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Value(v) => write!(f, "{:.1}%", v),
            Stat::NoData => f.write_str("n/a"),
        }
    }
}
