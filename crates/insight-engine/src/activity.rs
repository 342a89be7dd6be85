//! Month-over-month activity
//!
//! Headline numbers from the impact dashboard: how many stories arrived this
//! month and last, and who is telling them.

use crate::as_record;
use crate::calendar::YearMonth;
use chrono::{DateTime, FixedOffset, Utc};
use insight_model::{Contributor, StoryRecord};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Activity headline numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Records considered
    pub total_records: usize,
    /// Records created in the current calendar month
    pub this_month: usize,
    /// Records created in the previous calendar month
    pub last_month: usize,
    /// Rounded change from last month, `0` when last month was empty
    pub month_over_month_percent: i64,
    /// Anonymous records (no storyteller)
    pub community_voice_count: usize,
    /// Records told by youth storytellers
    pub youth_count: usize,
}

/// Summarise activity relative to the month containing `reference_now`
pub fn summarize_activity<R: Borrow<StoryRecord>>(
    records: &[R],
    reference_now: &DateTime<Utc>,
    offset: FixedOffset,
) -> ActivitySummary {
    let current = YearMonth::containing(reference_now, offset);
    let previous = current.months_back(1);
    let mut summary = ActivitySummary {
        total_records: records.len(),
        ..ActivitySummary::default()
    };

    for record in records {
        let record = as_record(record);
        if let Some(created_at) = record.created_at.as_ref() {
            let month = YearMonth::containing(created_at, offset);
            if month == current {
                summary.this_month += 1;
            } else if month == previous {
                summary.last_month += 1;
            }
        }
        if record.is_community_voice() {
            summary.community_voice_count += 1;
        }
        if record.storyteller.as_ref().is_some_and(Contributor::is_youth) {
            summary.youth_count += 1;
        }
    }

    summary.month_over_month_percent = growth_percent(summary.this_month, summary.last_month);
    summary
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn growth_percent(current: usize, previous: usize) -> i64 {
    if previous == 0 {
        return 0;
    }
    let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
    // halves round toward positive infinity
    (change + 0.5).floor() as i64
}
