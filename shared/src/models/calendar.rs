//! Calendar month enumeration

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month. Serialized as its number (1-12).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u32", into = "u32")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Month number, 1 for January through 12 for December
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_number(number: u32) -> EngineResult<Month> {
        match number {
            1..=12 => Ok(Month::ALL[(number - 1) as usize]),
            _ => Err(EngineError::validation(
                "month",
                format!("Month must be between 1 and 12, got {}", number),
            )),
        }
    }

    pub fn from_date(date: NaiveDate) -> Month {
        Month::ALL[date.month0() as usize]
    }

    /// Following month, wrapping December to January
    pub fn next(self) -> Month {
        Month::ALL[(self as usize + 1) % 12]
    }

    /// Preceding month, wrapping January to December
    pub fn previous(self) -> Month {
        Month::ALL[(self as usize + 11) % 12]
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for Month {
    type Error = EngineError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Month::from_number(value)
    }
}

impl From<Month> for u32 {
    fn from(month: Month) -> Self {
        month.number()
    }
}
