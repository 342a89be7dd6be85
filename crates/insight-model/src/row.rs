//! Data-access boundary
//!
//! Rows arrive from the hosted database as loosely-typed JSON. They are
//! normalised here exactly once so the engine can assume well-typed input:
//! blank strings become `None`, timestamps are parsed (or dropped), and a row
//! that cannot be decoded at all is reported instead of failing the batch.

use crate::id::{ContributorId, ServiceId, StoryId};
use crate::record::{Contributor, ServiceEntity, StoryRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Story row as selected from the `stories` table with joined profile/service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryRow {
    /// Row id
    pub id: String,
    /// Title
    pub title: String,
    /// Summary
    #[serde(default)]
    pub summary: Option<String>,
    /// Category column
    #[serde(default)]
    pub story_category: Option<String>,
    /// Location column
    #[serde(default)]
    pub location: Option<String>,
    /// Traditional knowledge flag
    #[serde(default)]
    pub traditional_knowledge: Option<bool>,
    /// Visibility flag
    #[serde(default)]
    pub is_public: Option<bool>,
    /// Sharing level
    #[serde(default)]
    pub privacy_level: Option<String>,
    /// Raw creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Joined storyteller profile
    #[serde(default)]
    pub storyteller: Option<ProfileRow>,
    /// Joined service
    #[serde(default)]
    pub service: Option<ServiceRow>,
}

/// Joined `profiles` row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Profile id
    pub id: String,
    /// Preferred name
    #[serde(default)]
    pub preferred_name: Option<String>,
    /// Full name
    #[serde(default)]
    pub full_name: Option<String>,
    /// Elder flag
    #[serde(default)]
    pub is_elder: Option<bool>,
    /// Language group
    #[serde(default)]
    pub language_group: Option<String>,
    /// Storyteller type
    #[serde(default)]
    pub storyteller_type: Option<String>,
}

/// Joined `services` row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRow {
    /// Service id
    pub id: String,
    /// Service name
    #[serde(default)]
    pub service_name: Option<String>,
}

impl From<ProfileRow> for Contributor {
    fn from(row: ProfileRow) -> Self {
        let preferred_name = non_blank(row.preferred_name);
        let full_name = non_blank(row.full_name)
            .or_else(|| preferred_name.clone())
            .unwrap_or_default();

        Self {
            id: ContributorId::new(row.id),
            preferred_name,
            full_name,
            is_elder: row.is_elder.unwrap_or(false),
            language_group: non_blank(row.language_group),
            storyteller_type: non_blank(row.storyteller_type),
        }
    }
}

impl From<ServiceRow> for ServiceEntity {
    fn from(row: ServiceRow) -> Self {
        let name = non_blank(row.service_name).unwrap_or_else(|| row.id.clone());
        Self {
            id: ServiceId::new(row.id),
            name,
        }
    }
}

impl From<StoryRow> for StoryRecord {
    fn from(row: StoryRow) -> Self {
        Self {
            id: StoryId::new(row.id),
            title: row.title,
            summary: non_blank(row.summary),
            category: non_blank(row.story_category),
            location: non_blank(row.location),
            created_at: row.created_at.as_deref().and_then(parse_timestamp),
            // Rows reaching the engine were already filtered to public ones
            is_public: row.is_public.unwrap_or(true),
            privacy_level: non_blank(row.privacy_level),
            traditional_knowledge: row.traditional_knowledge.unwrap_or(false),
            storyteller: row.storyteller.map(Contributor::from),
            service: row.service.map(ServiceEntity::from),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a database timestamp
///
/// Accepts RFC 3339, naive ISO-8601 (`2024-03-01T10:00:00[.f]`, taken as UTC),
/// PostgreSQL text output (`2024-03-01 10:00:00[.f]+10[:00]`) and bare dates.
/// Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A single row that could not be decoded
#[derive(Debug, thiserror::Error)]
#[error("row {index}{}: {source}", .id.as_ref().map(|id| format!(" ({id})")).unwrap_or_default())]
pub struct RowError {
    /// Position of the row in the input array
    pub index: usize,
    /// Row id, when one could be read
    pub id: Option<String>,
    /// Decoding failure
    #[source]
    pub source: serde_json::Error,
}

/// Input that is not a JSON array of rows
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Not valid JSON, or not an array
    #[error("input is not a JSON array of story rows: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result of normalising a batch of rows
#[derive(Debug, Default)]
pub struct LoadedRecords {
    /// Successfully normalised records, in input order
    pub records: Vec<StoryRecord>,
    /// Rows skipped because they could not be decoded
    pub rejected: Vec<RowError>,
}

impl LoadedRecords {
    /// Number of records whose timestamp was missing or unparseable
    #[must_use]
    pub fn undated_count(&self) -> usize {
        self.records.iter().filter(|r| r.created_at.is_none()).count()
    }

    /// Number of records flagged as not public
    #[must_use]
    pub fn private_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_public).count()
    }
}

/// Decode a JSON array of [`StoryRow`]s into records
///
/// Rows are decoded independently; one bad row never blanks the batch.
///
/// # Errors
/// Returns [`LoadError`] if the input is not a JSON array.
pub fn load_records(json: &str) -> Result<LoadedRecords, LoadError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut loaded = LoadedRecords::default();

    for (index, value) in values.into_iter().enumerate() {
        let id = value
            .get("id")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);

        match serde_json::from_value::<StoryRow>(value) {
            Ok(row) => loaded.records.push(StoryRecord::from(row)),
            Err(source) => loaded.rejected.push(RowError { index, id, source }),
        }
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_supported_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2024-03-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T20:00:00+10:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01 10:00:00+00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01 20:00:00+10:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-01"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("last tuesday"), None);
        assert_eq!(parse_timestamp("2024-13-45T00:00:00Z"), None);
    }

    #[test]
    fn normalises_blank_strings_to_none() {
        let row = StoryRow {
            id: "s1".to_string(),
            title: "Reef Day".to_string(),
            summary: Some("".to_string()),
            story_category: Some("  ".to_string()),
            location: Some(" Palm Island ".to_string()),
            ..StoryRow::default()
        };

        let record = StoryRecord::from(row);
        assert_eq!(record.summary, None);
        assert_eq!(record.category, None);
        assert_eq!(record.location.as_deref(), Some("Palm Island"));
        assert!(record.is_public);
    }

    #[test]
    fn privacy_level_is_carried_through() {
        let loaded = load_records(
            r#"[
                {"id": "s1", "title": "Shared", "privacy_level": "community",
                 "storyteller": {"id": "p1", "full_name": "Tom Palmer"}},
                {"id": "s2", "title": "Blank", "privacy_level": " "}
            ]"#,
        )
        .unwrap();
        assert_eq!(loaded.records[0].privacy_level.as_deref(), Some("community"));
        assert!(loaded.records[0].is_community_voice());
        assert_eq!(loaded.records[1].privacy_level, None);
    }

    #[test]
    fn profile_without_full_name_uses_preferred_name() {
        let row = ProfileRow {
            id: "p1".to_string(),
            preferred_name: Some("Aunty Val".to_string()),
            ..ProfileRow::default()
        };
        let contributor = Contributor::from(row);
        assert_eq!(contributor.full_name, "Aunty Val");
        assert_eq!(contributor.display_name(), "Aunty Val");
    }

    #[test]
    fn load_skips_undecodable_rows() {
        let json = r#"[
            {"id": "s1", "title": "Good row", "created_at": "2024-05-01T00:00:00Z"},
            {"id": "s2", "title": 42},
            {"id": "s3", "title": "Undated", "created_at": "not a date"},
            {"id": "s4", "title": "Private", "is_public": false}
        ]"#;

        let loaded = load_records(json).unwrap();
        assert_eq!(loaded.records.len(), 3);
        assert_eq!(loaded.rejected.len(), 1);
        assert_eq!(loaded.rejected[0].index, 1);
        assert_eq!(loaded.rejected[0].id.as_deref(), Some("s2"));
        assert_eq!(loaded.undated_count(), 2);
        assert_eq!(loaded.private_count(), 1);
    }

    #[test]
    fn load_resolves_joined_references() {
        let json = r#"[{
            "id": "s1",
            "title": "Men's group",
            "storyteller": {"id": "p1", "full_name": "Tom Palmer", "is_elder": true, "language_group": "Manbarra"},
            "service": {"id": "v1", "service_name": "Men's Program"}
        }]"#;

        let loaded = load_records(json).unwrap();
        let record = &loaded.records[0];
        let storyteller = record.storyteller.as_ref().unwrap();
        assert_eq!(storyteller.display_name(), "Tom Palmer");
        assert!(storyteller.is_elder);
        assert_eq!(storyteller.language_group.as_deref(), Some("Manbarra"));
        assert_eq!(record.service.as_ref().unwrap().name, "Men's Program");
    }

    #[test]
    fn load_rejects_non_array_input() {
        assert!(matches!(
            load_records(r#"{"id": "s1"}"#),
            Err(LoadError::Malformed(_))
        ));
    }
}
