//! Group-by-count aggregation
//!
//! One primitive, [`aggregate_by_key`], backs every ranked list on the
//! dashboard. The grouping key and the displayed label are separate so that
//! two contributors who share a display name are still counted apart.

use crate::as_record;
use indexmap::IndexMap;
use insight_model::{AggregationBucket, StoryRecord};
use std::borrow::Borrow;
use std::hash::Hash;

/// Group records by an identity key, count, and rank descending
///
/// `selector` returns the grouping key and the label shown for it, or `None`
/// to exclude the record entirely. The label of a group is the one seen on
/// its first record. Ties keep first-encountered order.
///
/// When `total_for_percentage` is `Some(n)` with `n > 0`, each bucket gets
/// `100 * count / n`; otherwise percentages are `0.0`.
pub fn aggregate_by_key<'a, R, K, F>(
    records: &'a [R],
    selector: F,
    total_for_percentage: Option<usize>,
) -> Vec<AggregationBucket>
where
    K: Hash + Eq,
    F: Fn(&'a R) -> Option<(K, &'a str)>,
{
    let mut groups: IndexMap<K, (&'a str, usize)> = IndexMap::new();
    for record in records {
        if let Some((key, label)) = selector(record) {
            groups.entry(key).or_insert((label, 0)).1 += 1;
        }
    }

    let mut buckets: Vec<AggregationBucket> = groups
        .into_values()
        .map(|(label, count)| AggregationBucket::new(label, count))
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    apply_percentages(&mut buckets, total_for_percentage);
    buckets
}

/// Group records by the string a field selector returns
///
/// The string is both the key and the label.
pub fn aggregate_by_field<'a, R, F>(
    records: &'a [R],
    selector: F,
    total_for_percentage: Option<usize>,
) -> Vec<AggregationBucket>
where
    F: Fn(&'a R) -> Option<&'a str>,
{
    aggregate_by_key(records, |r| selector(r).map(|v| (v, v)), total_for_percentage)
}

/// Overwrite bucket percentages against `total`
///
/// A missing or zero total yields `0.0`, never `NaN`.
#[allow(clippy::cast_precision_loss)]
pub fn apply_percentages(buckets: &mut [AggregationBucket], total: Option<usize>) {
    for bucket in buckets {
        bucket.percentage_of_total = match total {
            Some(total) if total > 0 => 100.0 * bucket.count as f64 / total as f64,
            _ => 0.0,
        };
    }
}

/// Sum of bucket counts (records that had a value for the field)
#[must_use]
pub fn eligible_count(buckets: &[AggregationBucket]) -> usize {
    buckets.iter().map(|b| b.count).sum()
}

/// Stories per category
pub fn by_category<R: Borrow<StoryRecord>>(
    records: &[R],
    total_for_percentage: Option<usize>,
) -> Vec<AggregationBucket> {
    aggregate_by_field(
        records,
        |r| as_record(r).category.as_deref(),
        total_for_percentage,
    )
}

/// Stories per location
pub fn by_location<R: Borrow<StoryRecord>>(
    records: &[R],
    total_for_percentage: Option<usize>,
) -> Vec<AggregationBucket> {
    aggregate_by_field(
        records,
        |r| as_record(r).location.as_deref(),
        total_for_percentage,
    )
}

/// Stories per contributor, grouped by id and labelled with the display name
pub fn by_contributor<R: Borrow<StoryRecord>>(
    records: &[R],
    total_for_percentage: Option<usize>,
) -> Vec<AggregationBucket> {
    aggregate_by_key(
        records,
        |r| {
            as_record(r)
                .storyteller
                .as_ref()
                .map(|c| (&c.id, c.display_name()))
        },
        total_for_percentage,
    )
}

/// Stories per service, grouped by id and labelled with the service name
pub fn by_service<R: Borrow<StoryRecord>>(
    records: &[R],
    total_for_percentage: Option<usize>,
) -> Vec<AggregationBucket> {
    aggregate_by_key(
        records,
        |r| {
            as_record(r)
                .service
                .as_ref()
                .map(|s| (&s.id, s.name.as_str()))
        },
        total_for_percentage,
    )
}
