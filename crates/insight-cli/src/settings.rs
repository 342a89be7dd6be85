//! Configuration loading and command-line overrides

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use insight_engine::{InsightConfig, TimeRange};
use std::fs;
use std::path::Path;

/// Values given on the command line, applied over the file configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--trailing-months`
    pub trailing_months: Option<u32>,
    /// `--range`
    pub time_range: Option<TimeRange>,
    /// `--top`
    pub keyword_limit: Option<usize>,
}

impl ConfigOverrides {
    /// Apply every present override
    #[must_use]
    pub fn apply(&self, mut config: InsightConfig) -> InsightConfig {
        if let Some(months) = self.trailing_months {
            config = config.with_trailing_months(months);
        }
        if let Some(range) = self.time_range {
            config = config.with_time_range(range);
        }
        if let Some(limit) = self.keyword_limit {
            config = config.with_keyword_limit(limit);
        }
        config
    }
}

/// Load configuration from an optional TOML file and validate it
///
/// Missing keys keep their defaults. Validation runs after overrides so a
/// bad command-line value is reported the same way as a bad file value.
///
/// # Errors
/// Fails when the file cannot be read, is not valid TOML for
/// [`InsightConfig`], or the merged configuration is out of range.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<InsightConfig> {
    let base = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config: InsightConfig = toml::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded configuration file");
            config
        }
        None => InsightConfig::default(),
    };

    let config = overrides.apply(base);
    config.validate().context("invalid insight configuration")?;
    Ok(config)
}

/// Reference instant from `--now`, or the current time
///
/// # Errors
/// Fails when the value is not RFC 3339.
pub fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("--now must be RFC 3339, got '{raw}'")),
        None => Ok(Utc::now()),
    }
}
