//! Plain-text rendering of reports

use insight_engine::InsightReport;
use insight_model::{AggregationBucket, KeywordEntry};
use std::fmt::Write;

/// Render a report as an aligned text summary
#[must_use]
pub fn render_report(source: &str, report: &InsightReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Community Insights: {source}");
    let _ = writeln!(out, "{}", "=".repeat(20 + source.len()));
    let _ = writeln!(
        out,
        "Reference: {}   Records: {}",
        report.reference_now.format("%Y-%m-%d %H:%M UTC"),
        report.record_count
    );
    out.push('\n');

    render_buckets(&mut out, "Top categories", &report.top_categories);
    render_buckets(&mut out, "Top locations", &report.top_locations);
    render_buckets(&mut out, "Top storytellers", &report.top_contributors);
    render_buckets(&mut out, "Top services", &report.top_services);

    let _ = writeln!(out, "Monthly trend:");
    for month in &report.monthly_trends {
        let _ = writeln!(out, "  {:<8} {:>5}", month.month_label, month.count);
    }
    out.push('\n');

    let metrics = &report.cultural_metrics;
    let _ = writeln!(out, "Cultural metrics:");
    let _ = writeln!(out, "  Elder stories            {:>5}", metrics.elder_story_count);
    let _ = writeln!(out, "  Traditional knowledge    {:>5}", metrics.traditional_knowledge_count);
    let _ = writeln!(out, "  Storytellers             {:>5}", metrics.unique_contributor_count);
    let _ = writeln!(out, "  Language groups          {:>5}", metrics.unique_language_group_count);
    out.push('\n');

    let activity = &report.activity;
    let _ = writeln!(out, "Activity:");
    let _ = writeln!(out, "  This month               {:>5}", activity.this_month);
    let _ = writeln!(out, "  Last month               {:>5}", activity.last_month);
    let _ = writeln!(
        out,
        "  Change                   {:>+5}%",
        activity.month_over_month_percent
    );
    let _ = writeln!(out, "  Community voice          {:>5}", activity.community_voice_count);
    let _ = writeln!(out, "  Youth                    {:>5}", activity.youth_count);
    out.push('\n');

    render_keywords(&mut out, &report.top_keywords);
    out
}

/// Render a keyword list on its own
#[must_use]
pub fn render_keyword_list(keywords: &[KeywordEntry]) -> String {
    let mut out = String::new();
    render_keywords(&mut out, keywords);
    out
}

fn render_buckets(out: &mut String, title: &str, buckets: &[AggregationBucket]) {
    let _ = writeln!(out, "{title}:");
    if buckets.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for bucket in buckets {
        let _ = writeln!(
            out,
            "  {:<28} {:>5} {:>6.1}%",
            bucket.key, bucket.count, bucket.percentage_of_total
        );
    }
    out.push('\n');
}

fn render_keywords(out: &mut String, keywords: &[KeywordEntry]) {
    let _ = writeln!(out, "Keywords:");
    if keywords.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for entry in keywords {
        let _ = writeln!(out, "  {:<20} {:>5}", entry.word, entry.frequency);
    }
}
