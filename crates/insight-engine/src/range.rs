//! Reporting period filter

use crate::calendar::YearMonth;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Period a report covers, counted from the start of the current calendar unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Every record, including undated ones
    #[default]
    All,
    /// Since 1 January of the current year
    Year,
    /// Since the first day of the current quarter
    Quarter,
    /// Since the first day of the current month
    Month,
}

impl TimeRange {
    /// First month included by this range, `None` for [`TimeRange::All`]
    #[must_use]
    pub fn start_month(self, reference_now: &DateTime<Utc>, offset: FixedOffset) -> Option<YearMonth> {
        let current = YearMonth::containing(reference_now, offset);
        match self {
            Self::All => None,
            Self::Year => Some(current.year_start()),
            Self::Quarter => Some(current.quarter_start()),
            Self::Month => Some(current),
        }
    }

    /// First instant included by this range, `None` for [`TimeRange::All`]
    #[must_use]
    pub fn start(self, reference_now: &DateTime<Utc>, offset: FixedOffset) -> Option<DateTime<Utc>> {
        self.start_month(reference_now, offset)
            .and_then(|month| month.first_instant(offset))
    }

    /// Whether a record created at `created_at` falls inside this range
    ///
    /// Bounded ranges exclude undated records; they cannot be placed.
    #[must_use]
    pub fn admits(
        self,
        created_at: Option<&DateTime<Utc>>,
        reference_now: &DateTime<Utc>,
        offset: FixedOffset,
    ) -> bool {
        match self.start_month(reference_now, offset) {
            None => true,
            Some(start) => created_at
                .is_some_and(|ts| YearMonth::containing(ts, offset).index() >= start.index()),
        }
    }

    /// Lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Year => "year",
            Self::Quarter => "quarter",
            Self::Month => "month",
        }
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown range name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time range '{0}' (expected all, year, quarter or month)")]
pub struct ParseTimeRangeError(String);

impl FromStr for TimeRange {
    type Err = ParseTimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "year" => Ok(Self::Year),
            "quarter" => Ok(Self::Quarter),
            "month" => Ok(Self::Month),
            _ => Err(ParseTimeRangeError(s.to_string())),
        }
    }
}
