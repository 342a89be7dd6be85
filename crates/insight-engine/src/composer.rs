//! Insight composition
//!
//! Runs every aggregation over one input set and packages the result for
//! the presentation layer. Composition is a pure function of the records,
//! the configuration and `reference_now`.

use crate::activity::{summarize_activity, ActivitySummary};
use crate::categorical::{
    apply_percentages, by_category, by_contributor, by_location, by_service, eligible_count,
};
use crate::config::{InsightConfig, PercentageBasis};
use crate::cultural::{summarize_cultural_metrics, CulturalMetrics};
use crate::error::ConfigError;
use crate::keywords::KeywordExtractor;
use crate::timeline::bucket_by_month_with_offset;
use chrono::{DateTime, FixedOffset, Utc};
use insight_model::{AggregationBucket, KeywordEntry, MonthBucket, StoryRecord};
use serde::{Deserialize, Serialize};

/// Everything the insights dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    /// Reference instant the report was computed against
    pub reference_now: DateTime<Utc>,
    /// Records remaining after the time-range filter
    pub record_count: usize,
    /// Ranked categories
    pub top_categories: Vec<AggregationBucket>,
    /// Ranked locations
    pub top_locations: Vec<AggregationBucket>,
    /// Ranked contributors (by display name, grouped by id)
    pub top_contributors: Vec<AggregationBucket>,
    /// Ranked services
    pub top_services: Vec<AggregationBucket>,
    /// Trailing monthly counts, oldest first
    pub monthly_trends: Vec<MonthBucket>,
    /// Cultural metrics
    pub cultural_metrics: CulturalMetrics,
    /// Month-over-month activity
    pub activity: ActivitySummary,
    /// Ranked keywords
    pub top_keywords: Vec<KeywordEntry>,
}

/// Validated composer
///
/// Construction is where configuration errors surface; once built,
/// [`compose`](Self::compose) cannot fail.
#[derive(Debug, Clone)]
pub struct InsightComposer {
    config: InsightConfig,
    extractor: KeywordExtractor,
    offset: FixedOffset,
}

impl InsightComposer {
    /// Validate `config` and build a composer
    ///
    /// # Errors
    /// Returns [`ConfigError`] for out-of-range settings.
    pub fn new(config: InsightConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let offset = config.offset()?;
        let extractor = KeywordExtractor::new(&config.keywords)?;
        Ok(Self {
            config,
            extractor,
            offset,
        })
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Compose a report
    #[must_use]
    pub fn compose(&self, records: &[StoryRecord], reference_now: DateTime<Utc>) -> InsightReport {
        let config = &self.config;
        tracing::debug!(
            records = records.len(),
            range = %config.time_range,
            "composing insights"
        );

        let private = records.iter().filter(|r| !r.is_public).count();
        if private > 0 {
            tracing::warn!(private, "private records handed to insight composer");
        }

        let scoped: Vec<&StoryRecord> = records
            .iter()
            .filter(|r| {
                config
                    .time_range
                    .admits(r.created_at.as_ref(), &reference_now, self.offset)
            })
            .collect();

        let report = InsightReport {
            reference_now,
            record_count: scoped.len(),
            top_categories: self.ranked(
                by_category(&scoped, None),
                scoped.len(),
                config.top_categories_limit,
            ),
            top_locations: self.ranked(
                by_location(&scoped, None),
                scoped.len(),
                config.top_locations_limit,
            ),
            top_contributors: self.ranked(
                by_contributor(&scoped, None),
                scoped.len(),
                config.top_contributors_limit,
            ),
            top_services: self.ranked(
                by_service(&scoped, None),
                scoped.len(),
                config.top_services_limit,
            ),
            monthly_trends: bucket_by_month_with_offset(
                &scoped,
                |r| r.created_at,
                config.trailing_months,
                reference_now,
                self.offset,
            ),
            cultural_metrics: summarize_cultural_metrics(&scoped),
            activity: summarize_activity(&scoped, &reference_now, self.offset),
            top_keywords: self
                .extractor
                .extract(scoped.iter().map(|r| r.keyword_text()), config.top_keywords_limit),
        };

        tracing::debug!(
            record_count = report.record_count,
            categories = report.top_categories.len(),
            keywords = report.top_keywords.len(),
            "insights composed"
        );
        report
    }

    /// Attach percentages to a full ranking, then truncate
    fn ranked(
        &self,
        mut buckets: Vec<AggregationBucket>,
        record_count: usize,
        limit: usize,
    ) -> Vec<AggregationBucket> {
        let total = match self.config.percentage_basis {
            PercentageBasis::Eligible => eligible_count(&buckets),
            PercentageBasis::AllRecords => record_count,
        };
        apply_percentages(&mut buckets, Some(total));
        buckets.truncate(limit);
        buckets
    }
}

/// Validate `config` and compose one report
///
/// # Errors
/// Returns [`ConfigError`] for out-of-range settings; data problems never
/// produce errors.
pub fn compose_insights(
    records: &[StoryRecord],
    config: &InsightConfig,
    reference_now: DateTime<Utc>,
) -> Result<InsightReport, ConfigError> {
    Ok(InsightComposer::new(config.clone())?.compose(records, reference_now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::TimeRange;
    use chrono::TimeZone;
    use insight_model::{Contributor, ServiceEntity};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap()
    }

    fn record(id: &str, category: Option<&str>, month: u32) -> StoryRecord {
        let mut r = StoryRecord::new(id, format!("Story {id}"));
        r.category = category.map(str::to_string);
        r.created_at = Some(Utc.with_ymd_and_hms(2024, month, 3, 0, 0, 0).unwrap());
        r
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = compose_insights(&[], &InsightConfig::default(), now()).unwrap();
        assert_eq!(report.record_count, 0);
        assert!(report.top_categories.is_empty());
        assert!(report.top_locations.is_empty());
        assert!(report.top_contributors.is_empty());
        assert!(report.top_services.is_empty());
        assert!(report.top_keywords.is_empty());
        assert_eq!(report.monthly_trends.len(), 6);
        assert!(report.monthly_trends.iter().all(|m| m.count == 0));
        assert_eq!(report.cultural_metrics, CulturalMetrics::default());
        assert_eq!(report.activity, ActivitySummary::default());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let config = InsightConfig::new().with_trailing_months(0);
        assert!(matches!(
            compose_insights(&[], &config, now()),
            Err(ConfigError::InvalidTrailingMonths { .. })
        ));
    }

    #[test]
    fn truncation_happens_after_ranking() {
        let records = vec![
            record("1", Some("rare"), 6),
            record("2", Some("common"), 6),
            record("3", Some("common"), 6),
        ];
        let config = InsightConfig::new().with_uniform_limit(1);
        let report = compose_insights(&records, &config, now()).unwrap();
        assert_eq!(report.top_categories.len(), 1);
        assert_eq!(report.top_categories[0].key, "common");
        // percentage is against the full ranking, not the truncated one
        assert!((report.top_categories[0].percentage_of_total - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn percentage_basis_all_records_counts_missing_values() {
        let records = vec![record("1", Some("culture"), 6), record("2", None, 6)];
        let eligible = compose_insights(&records, &InsightConfig::default(), now()).unwrap();
        assert!((eligible.top_categories[0].percentage_of_total - 100.0).abs() < 1e-9);

        let config = InsightConfig::new().with_percentage_basis(PercentageBasis::AllRecords);
        let all = compose_insights(&records, &config, now()).unwrap();
        assert!((all.top_categories[0].percentage_of_total - 50.0).abs() < 1e-9);
    }

    #[test]
    fn time_range_filters_before_aggregation() {
        let mut undated = StoryRecord::new("u", "Undated");
        undated.category = Some("culture".to_string());
        let records = vec![
            record("1", Some("culture"), 6),
            record("2", Some("health"), 2),
            undated,
        ];

        let all = compose_insights(&records, &InsightConfig::default(), now()).unwrap();
        assert_eq!(all.record_count, 3);

        let config = InsightConfig::new().with_time_range(TimeRange::Quarter);
        let quarter = compose_insights(&records, &config, now()).unwrap();
        assert_eq!(quarter.record_count, 1);
        assert_eq!(quarter.top_categories.len(), 1);
        assert_eq!(quarter.top_categories[0].key, "culture");
    }

    #[test]
    fn composer_is_reusable() {
        let mut r = record("1", Some("culture"), 6);
        r.storyteller = Some(Contributor::new("c1", "Alf"));
        r.service = Some(ServiceEntity::new("v1", "Health Centre"));
        let composer = InsightComposer::new(InsightConfig::default()).unwrap();

        let first = composer.compose(std::slice::from_ref(&r), now());
        let second = composer.compose(std::slice::from_ref(&r), now());
        assert_eq!(first, second);
        assert_eq!(first.top_services[0].key, "Health Centre");
        assert_eq!(first.top_contributors[0].key, "Alf");
    }
}
