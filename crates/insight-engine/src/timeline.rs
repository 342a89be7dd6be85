//! Trailing-window monthly buckets

use crate::calendar::YearMonth;
use crate::config::MAX_TRAILING_MONTHS;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use insight_model::MonthBucket;

/// Count records per calendar month over a trailing window, in UTC
///
/// See [`bucket_by_month_with_offset`].
pub fn bucket_by_month<R, F>(
    records: &[R],
    time_selector: F,
    trailing_months: u32,
    reference_now: DateTime<Utc>,
) -> Vec<MonthBucket>
where
    F: Fn(&R) -> Option<DateTime<Utc>>,
{
    bucket_by_month_with_offset(records, time_selector, trailing_months, reference_now, Utc.fix())
}

/// Count records per calendar month over a trailing window
///
/// Produces exactly `trailing_months` buckets, oldest first, ending with the
/// month containing `reference_now`. Months without records are kept with a
/// zero count. Records without a timestamp, or outside the window, are
/// skipped.
///
/// Windows longer than [`MAX_TRAILING_MONTHS`] are clamped to it.
pub fn bucket_by_month_with_offset<R, F>(
    records: &[R],
    time_selector: F,
    trailing_months: u32,
    reference_now: DateTime<Utc>,
    offset: FixedOffset,
) -> Vec<MonthBucket>
where
    F: Fn(&R) -> Option<DateTime<Utc>>,
{
    if trailing_months == 0 {
        return Vec::new();
    }
    if trailing_months > MAX_TRAILING_MONTHS {
        tracing::debug!(
            requested = trailing_months,
            max = MAX_TRAILING_MONTHS,
            "clamping monthly window"
        );
    }
    let trailing_months = trailing_months.min(MAX_TRAILING_MONTHS);

    let current = YearMonth::containing(&reference_now, offset);
    let first = current.months_back(trailing_months - 1);
    let mut counts = vec![0usize; trailing_months as usize];
    let mut skipped = 0usize;

    for record in records {
        let slot = time_selector(record)
            .map(|ts| YearMonth::containing(&ts, offset).index() - first.index())
            .and_then(|delta| usize::try_from(delta).ok())
            .filter(|&slot| slot < counts.len());
        match slot {
            Some(slot) => counts[slot] += 1,
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, trailing_months, "records outside monthly window");
    }

    (0..trailing_months)
        .zip(counts)
        .map(|(i, count)| MonthBucket {
            month_label: first.months_forward(i).label(),
            count,
        })
        .collect()
}
