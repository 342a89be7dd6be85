//! Aggregation output units
//!
//! All outputs are serializable so the presentation collaborator can consume
//! them as JSON.

use serde::{Deserialize, Serialize};

/// One grouped-and-counted bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationBucket {
    /// Display key (category, location, resolved name, ...)
    pub key: String,

    /// Number of contributing records
    pub count: usize,

    /// `100 * count / total`, or `0.0` when no total applies
    pub percentage_of_total: f64,
}

impl AggregationBucket {
    /// Create a bucket with no percentage
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
            percentage_of_total: 0.0,
        }
    }
}

/// One calendar-month bucket of a trailing window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Label such as `"Mar 24"`
    pub month_label: String,

    /// Records created in that month
    pub count: usize,
}

/// One keyword with its corpus frequency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    /// Lowercased token
    pub word: String,

    /// Occurrences across the corpus
    pub frequency: usize,
}

impl KeywordEntry {
    /// Create an entry
    #[inline]
    #[must_use]
    pub fn new(word: impl Into<String>, frequency: usize) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }
}
