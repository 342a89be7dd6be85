//! Story Insights Engine
//!
//! Pure aggregation over already-fetched story records: the numbers behind
//! the community patterns and impact dashboards.
//!
//! # Core Concepts
//!
//! - [`extract_keywords`] / [`KeywordExtractor`]: frequency-ranked keywords
//!   with stop-word filtering
//! - [`aggregate_by_field`] / [`aggregate_by_key`]: group, count and rank;
//!   reused for categories, locations, contributors and services
//! - [`bucket_by_month`]: zero-filled trailing calendar-month counts
//! - [`summarize_cultural_metrics`]: elder, traditional knowledge, contributor
//!   and language group counts
//! - [`summarize_activity`]: this month versus last month
//! - [`InsightComposer`]: validates an [`InsightConfig`] and produces an
//!   [`InsightReport`]
//! - [`InsightCache`]: optional memoisation keyed by an input digest
//!
//! No I/O happens here. The same records, configuration and reference
//! instant always produce the same report.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use insight_engine::{compose_insights, InsightConfig};
//! use insight_model::{Contributor, StoryRecord};
//!
//! let mut story = StoryRecord::new("s1", "Elders share stories of Hull River");
//! story.category = Some("culture".to_string());
//! story.created_at = Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap());
//! let mut teller = Contributor::new("c1", "Margaret Palmer");
//! teller.is_elder = true;
//! story.storyteller = Some(teller);
//!
//! let now = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
//! let report = compose_insights(&[story], &InsightConfig::default(), now).unwrap();
//!
//! assert_eq!(report.top_categories[0].key, "culture");
//! assert_eq!(report.cultural_metrics.elder_story_count, 1);
//! assert_eq!(report.monthly_trends.last().unwrap().count, 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod activity;
pub mod cache;
pub mod calendar;
pub mod categorical;
pub mod composer;
pub mod config;
pub mod cultural;
pub mod error;
pub mod keywords;
pub mod range;
pub mod timeline;

// Re-exports
pub use activity::{summarize_activity, ActivitySummary};
pub use cache::{CacheStats, InsightCache, ReportKey};
pub use calendar::YearMonth;
pub use categorical::{
    aggregate_by_field, aggregate_by_key, apply_percentages, by_category, by_contributor,
    by_location, by_service, eligible_count,
};
pub use composer::{compose_insights, InsightComposer, InsightReport};
pub use config::{
    InsightConfig, KeywordConfig, PercentageBasis, MAX_TOKEN_LENGTH, MAX_TRAILING_MONTHS,
};
pub use cultural::{summarize_cultural_metrics, CulturalMetrics};
pub use error::{ConfigError, InsightError, InsightResult};
pub use keywords::{default_stop_words, extract_keywords, KeywordExtractor, DEFAULT_STOP_WORDS};
pub use range::{ParseTimeRangeError, TimeRange};
pub use timeline::{bucket_by_month, bucket_by_month_with_offset};

use insight_model::StoryRecord;
use std::borrow::Borrow;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for composing insights
    pub use crate::{
        compose_insights, InsightCache, InsightComposer, InsightConfig, InsightError,
        InsightReport, PercentageBasis, TimeRange,
    };
    pub use insight_model::{Contributor, ServiceEntity, StoryRecord};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[inline]
fn as_record<R: Borrow<StoryRecord>>(record: &R) -> &StoryRecord {
    <R as Borrow<StoryRecord>>::borrow(record)
}
