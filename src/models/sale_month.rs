//! Calendar month of a sale
//!
//! Monthly profit is grouped by the (year, month) of each sale date. The key
//! orders chronologically; turning it into a label is a display concern.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (year, month) grouping key
///
/// Serialized as "YYYY-MM" so it can key a JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SaleMonth {
    pub year: i32,
    pub month: u32,
}

impl SaleMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing the given date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Parse "YYYY-MM"
    pub fn parse(s: &str) -> Result<Self, SaleMonthParseError> {
        let s = s.trim();
        let (year, month) = s
            .rsplit_once('-')
            .ok_or_else(|| SaleMonthParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| SaleMonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| SaleMonthParseError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(SaleMonthParseError::InvalidMonth(month));
        }

        Ok(Self { year, month })
    }
}

impl fmt::Display for SaleMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for SaleMonth {
    type Error = SaleMonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SaleMonth> for String {
    fn from(value: SaleMonth) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleMonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for SaleMonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for SaleMonthParseError {}
