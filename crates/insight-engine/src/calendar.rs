//! Calendar-month arithmetic
//!
//! Months are handled as a linear index (`year * 12 + month0`) so trailing
//! windows and range starts reduce to integer comparisons.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    /// Zero-based month
    month0: u32,
}

impl YearMonth {
    /// Create from a year and a one-based month
    ///
    /// Returns `None` when `month` is not in `1..=12`.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then(|| Self {
            year,
            month0: month - 1,
        })
    }

    /// Month containing `instant` as seen from `offset`
    #[must_use]
    pub fn containing(instant: &DateTime<Utc>, offset: FixedOffset) -> Self {
        let local = instant.with_timezone(&offset);
        Self {
            year: local.year(),
            month0: local.month0(),
        }
    }

    /// Calendar year
    #[inline]
    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    /// One-based month
    #[inline]
    #[must_use]
    pub fn month(self) -> u32 {
        self.month0 + 1
    }

    /// Linear month index
    #[inline]
    #[must_use]
    pub fn index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month0)
    }

    /// Month `n` months before this one
    #[must_use]
    pub fn months_back(self, n: u32) -> Self {
        Self::from_index(self.index() - i64::from(n))
    }

    /// Month `n` months after this one
    #[must_use]
    pub fn months_forward(self, n: u32) -> Self {
        Self::from_index(self.index() + i64::from(n))
    }

    /// First month of the calendar quarter containing this month
    #[must_use]
    pub fn quarter_start(self) -> Self {
        Self {
            year: self.year,
            month0: self.month0 - self.month0 % 3,
        }
    }

    /// January of this month's year
    #[must_use]
    pub fn year_start(self) -> Self {
        Self {
            year: self.year,
            month0: 0,
        }
    }

    /// Midnight on the first day of this month, as seen from `offset`
    #[must_use]
    pub fn first_instant(self, offset: FixedOffset) -> Option<DateTime<Utc>> {
        offset
            .with_ymd_and_hms(self.year, self.month(), 1, 0, 0, 0)
            .single()
            .map(|local| local.with_timezone(&Utc))
    }

    /// Short label such as `"Mar 24"`
    ///
    /// English abbreviations, independent of the process locale.
    #[must_use]
    pub fn label(self) -> String {
        format!(
            "{} {:02}",
            MONTH_ABBREVIATIONS[self.month0 as usize],
            self.year.rem_euclid(100)
        )
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month0: index.rem_euclid(12) as u32,
        }
    }
}

/// Build a fixed offset from minutes east of UTC
///
/// Returns `None` when the offset is a full day or more.
#[must_use]
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .filter(|_| minutes.abs() < 24 * 60)
}
