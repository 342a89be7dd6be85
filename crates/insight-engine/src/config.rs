//! Engine configuration
//!
//! Defaults mirror the community patterns dashboard: eight categories, five
//! of everything else, twelve keywords over a six-month window.

use crate::calendar::offset_from_minutes;
use crate::error::ConfigError;
use crate::keywords::default_stop_words;
use crate::range::TimeRange;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// Longest accepted trailing window (twenty years)
pub const MAX_TRAILING_MONTHS: u32 = 240;

/// Longest accepted minimum keyword length
pub const MAX_TOKEN_LENGTH: usize = 64;

/// Denominator used for bucket percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageBasis {
    /// Records that have a value for the aggregated field
    #[default]
    Eligible,
    /// Every record in the (range-filtered) input
    AllRecords,
}

/// Keyword extraction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Shortest token kept
    pub min_token_length: usize,
    /// Tokens never counted
    pub stop_words: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            min_token_length: 4,
            stop_words: default_stop_words(),
        }
    }
}

/// Configuration for [`InsightComposer`](crate::InsightComposer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Months in the trend window, including the current one
    pub trailing_months: u32,
    /// Categories kept after ranking
    pub top_categories_limit: usize,
    /// Locations kept after ranking
    pub top_locations_limit: usize,
    /// Contributors kept after ranking
    pub top_contributors_limit: usize,
    /// Services kept after ranking
    pub top_services_limit: usize,
    /// Keywords kept after ranking
    pub top_keywords_limit: usize,
    /// Percentage denominator
    pub percentage_basis: PercentageBasis,
    /// Reporting period
    pub time_range: TimeRange,
    /// Offset used for calendar-month boundaries, minutes east of UTC
    pub utc_offset_minutes: i32,
    /// Keyword extraction
    pub keywords: KeywordConfig,
}

impl InsightConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With trailing window length
    #[inline]
    #[must_use]
    pub fn with_trailing_months(mut self, months: u32) -> Self {
        self.trailing_months = months;
        self
    }

    /// With the same limit for every ranked list
    #[inline]
    #[must_use]
    pub fn with_uniform_limit(mut self, limit: usize) -> Self {
        self.top_categories_limit = limit;
        self.top_locations_limit = limit;
        self.top_contributors_limit = limit;
        self.top_services_limit = limit;
        self.top_keywords_limit = limit;
        self
    }

    /// With keyword limit
    #[inline]
    #[must_use]
    pub fn with_keyword_limit(mut self, limit: usize) -> Self {
        self.top_keywords_limit = limit;
        self
    }

    /// With percentage basis
    #[inline]
    #[must_use]
    pub fn with_percentage_basis(mut self, basis: PercentageBasis) -> Self {
        self.percentage_basis = basis;
        self
    }

    /// With reporting period
    #[inline]
    #[must_use]
    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = range;
        self
    }

    /// With calendar offset in minutes east of UTC
    #[inline]
    #[must_use]
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// With stop words replacing the defaults
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Check every field
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trailing_months == 0 || self.trailing_months > MAX_TRAILING_MONTHS {
            return Err(ConfigError::InvalidTrailingMonths {
                value: self.trailing_months,
                max: MAX_TRAILING_MONTHS,
            });
        }
        let min_len = self.keywords.min_token_length;
        if min_len == 0 || min_len > MAX_TOKEN_LENGTH {
            return Err(ConfigError::InvalidTokenLength {
                value: min_len,
                max: MAX_TOKEN_LENGTH,
            });
        }
        self.offset()?;
        Ok(())
    }

    /// Calendar offset
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidUtcOffset`] for offsets of a day or more.
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        offset_from_minutes(self.utc_offset_minutes)
            .ok_or(ConfigError::InvalidUtcOffset(self.utc_offset_minutes))
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            trailing_months: 6,
            top_categories_limit: 8,
            top_locations_limit: 5,
            top_contributors_limit: 5,
            top_services_limit: 5,
            top_keywords_limit: 12,
            percentage_basis: PercentageBasis::default(),
            time_range: TimeRange::default(),
            utc_offset_minutes: 0,
            keywords: KeywordConfig::default(),
        }
    }
}
