//! Subcommand implementations
//!
//! Each returns the text to print so the binary stays a thin dispatcher.

use crate::input::read_records;
use crate::render::{render_keyword_list, render_report};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use insight_engine::{
    InsightCache, InsightComposer, InsightConfig, InsightReport, KeywordExtractor,
};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Report for one input file
#[derive(Debug, Clone, Serialize)]
pub struct NamedReport {
    /// Input path as given
    pub input: String,
    /// Composed report
    pub report: InsightReport,
}

/// Compose one report per input, in parallel
///
/// Output order follows `inputs`. Identical inputs share one composition
/// through an [`InsightCache`]. With `json`, a single input prints its
/// report object and several inputs print an array of [`NamedReport`]s.
///
/// # Errors
/// Fails on the first input that cannot be read, or on an invalid
/// configuration.
pub fn run_report(
    inputs: &[PathBuf],
    config: &InsightConfig,
    reference_now: DateTime<Utc>,
    json: bool,
) -> Result<String> {
    let composer = InsightComposer::new(config.clone()).context("invalid insight configuration")?;
    let cache = InsightCache::default();

    let reports = inputs
        .par_iter()
        .map(|path| -> Result<NamedReport> {
            let loaded = read_records(path)?;
            let report = cache.get_or_compose(&composer, &loaded.records, reference_now)?;
            Ok(NamedReport {
                input: path.display().to_string(),
                report: InsightReport::clone(&report),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        let rendered = match reports.as_slice() {
            [single] => serde_json::to_string_pretty(&single.report)?,
            many => serde_json::to_string_pretty(many)?,
        };
        return Ok(rendered);
    }

    Ok(reports
        .iter()
        .map(|named| render_report(&named.input, &named.report))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Extract keywords from one input
///
/// # Errors
/// Fails when the input cannot be read or the keyword settings are invalid.
pub fn run_keywords(input: &Path, config: &InsightConfig, json: bool) -> Result<String> {
    let extractor =
        KeywordExtractor::new(&config.keywords).context("invalid keyword configuration")?;
    let loaded = read_records(input)?;
    let keywords = extractor.extract(
        loaded.records.iter().map(|r| r.keyword_text()),
        config.top_keywords_limit,
    );

    if json {
        Ok(serde_json::to_string_pretty(&keywords)?)
    } else {
        Ok(render_keyword_list(&keywords))
    }
}

/// Result of `check`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Human-readable summary
    pub summary: String,
    /// False when any row was rejected
    pub passed: bool,
}

/// Validate one input without composing a report
///
/// # Errors
/// Fails when the input cannot be read or is not a JSON array.
pub fn run_check(input: &Path) -> Result<CheckOutcome> {
    let loaded = read_records(input)?;
    let mut summary = String::new();

    let _ = writeln!(summary, "Input: {}", input.display());
    let _ = writeln!(summary, "  Records:          {}", loaded.records.len());
    let _ = writeln!(summary, "  Rejected rows:    {}", loaded.rejected.len());
    let _ = writeln!(summary, "  Without date:     {}", loaded.undated_count());
    let _ = writeln!(summary, "  Not public:       {}", loaded.private_count());
    for rejected in &loaded.rejected {
        let _ = writeln!(summary, "  - {rejected}");
    }

    let passed = loaded.rejected.is_empty();
    let _ = writeln!(summary, "{}", if passed { "OK" } else { "FAILED" });
    Ok(CheckOutcome { summary, passed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_test_utils::{community_fixture, reference_now};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    const ROWS: &str = r#"[
        {"id": "s1", "title": "Elders share stories", "story_category": "culture",
         "location": "Palm Island", "created_at": "2024-06-02T01:00:00Z",
         "storyteller": {"id": "p1", "full_name": "Valerie Johnson",
                         "preferred_name": "Aunty Val", "is_elder": true}},
        {"id": "s2", "title": "Garden harvest", "story_category": "health",
         "created_at": "2024-05-20 09:00:00+10", "is_public": false},
        {"id": "s3", "title": "Reef survey", "story_category": "  ",
         "created_at": "not a date"},
        {"id": "s4", "title": ["broken"]}
    ]"#;

    #[test]
    fn report_json_for_single_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "rows.json", ROWS);

        let out = run_report(&[path], &InsightConfig::default(), reference_now(), true).unwrap();
        let report: InsightReport = serde_json::from_str(&out).unwrap();

        assert_eq!(report.record_count, 3);
        assert_eq!(report.top_categories.len(), 2);
        assert_eq!(report.top_contributors[0].key, "Aunty Val");
        assert_eq!(report.cultural_metrics.elder_story_count, 1);
    }

    #[test]
    fn report_json_for_several_inputs_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_fixture(&dir, "a.json", ROWS);
        let fixture = serde_json::to_string(&community_rows()).unwrap();
        let second = write_fixture(&dir, "b.json", &fixture);

        let out = run_report(
            &[first.clone(), second.clone()],
            &InsightConfig::default(),
            reference_now(),
            true,
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let items = parsed.as_array().unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["input"], first.display().to_string());
        assert_eq!(items[1]["input"], second.display().to_string());
        assert_eq!(items[1]["report"]["record_count"], 6);
    }

    #[test]
    fn repeated_input_yields_identical_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "rows.json", ROWS);

        let out = run_report(
            &[path.clone(), path],
            &InsightConfig::default(),
            reference_now(),
            true,
        )
        .unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["report"], parsed[1]["report"]);
    }

    #[test]
    fn report_text_mentions_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "rows.json", ROWS);
        let out = run_report(
            &[path],
            &InsightConfig::default(),
            reference_now(),
            false,
        )
        .unwrap();
        assert!(out.contains("rows.json"));
        assert!(out.contains("culture"));
    }

    #[test]
    fn report_fails_for_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(run_report(&[missing], &InsightConfig::default(), reference_now(), true).is_err());
    }

    #[test]
    fn keywords_respect_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "rows.json", ROWS);
        let config = InsightConfig::default().with_keyword_limit(2);

        let out = run_keywords(&path, &config, true).unwrap();
        let words: Vec<insight_model::KeywordEntry> = serde_json::from_str(&out).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word, "elders");
    }

    #[test]
    fn check_reports_problems() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "rows.json", ROWS);

        let outcome = run_check(&path).unwrap();
        assert!(!outcome.passed);
        assert!(outcome.summary.contains("Records:          3"));
        assert!(outcome.summary.contains("Rejected rows:    1"));
        assert!(outcome.summary.contains("Without date:     1"));
        assert!(outcome.summary.contains("Not public:       1"));
        assert!(outcome.summary.contains("row 3 (s4)"));
    }

    #[test]
    fn check_passes_clean_input() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = serde_json::to_string(&community_rows()).unwrap();
        let path = write_fixture(&dir, "clean.json", &fixture);
        let outcome = run_check(&path).unwrap();
        assert!(outcome.passed);
        assert!(outcome.summary.ends_with("OK\n"));
    }

    fn community_rows() -> Vec<insight_model::StoryRow> {
        community_fixture()
            .into_iter()
            .map(|r| insight_model::StoryRow {
                id: r.id.to_string(),
                title: r.title,
                summary: r.summary,
                story_category: r.category,
                location: r.location,
                traditional_knowledge: Some(r.traditional_knowledge),
                is_public: Some(r.is_public),
                privacy_level: r.privacy_level,
                created_at: r.created_at.map(|ts| ts.to_rfc3339()),
                storyteller: r.storyteller.map(|c| insight_model::ProfileRow {
                    id: c.id.to_string(),
                    preferred_name: c.preferred_name,
                    full_name: Some(c.full_name),
                    is_elder: Some(c.is_elder),
                    language_group: c.language_group,
                    storyteller_type: c.storyteller_type,
                }),
                service: r.service.map(|s| insight_model::ServiceRow {
                    id: s.id.to_string(),
                    service_name: Some(s.name),
                }),
            })
            .collect()
    }
}
