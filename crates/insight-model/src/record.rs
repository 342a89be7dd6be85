//! Input records
//!
//! These are the structural contract between the data-access collaborator and
//! the aggregation engine. Everything here is plain data: the engine never
//! mutates a record.

use crate::id::{ContributorId, ServiceId, StoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One community story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRecord {
    /// Unique story identifier
    pub id: StoryId,

    /// Short title
    pub title: String,

    /// Optional free-text summary, used for keyword extraction
    #[serde(default)]
    pub summary: Option<String>,

    /// Optional category label
    #[serde(default)]
    pub category: Option<String>,

    /// Optional place name
    #[serde(default)]
    pub location: Option<String>,

    /// Creation time; `None` when the source timestamp was missing or unparseable
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Whether the story is public
    #[serde(default = "default_public")]
    pub is_public: bool,

    /// Sharing level chosen by the storyteller (`"public"`, `"community"`, ...)
    #[serde(default)]
    pub privacy_level: Option<String>,

    /// Whether the story carries traditional/cultural knowledge
    #[serde(default)]
    pub traditional_knowledge: bool,

    /// Resolved storyteller, absent for anonymous stories
    #[serde(default)]
    pub storyteller: Option<Contributor>,

    /// Resolved service, if the story is linked to one
    #[serde(default)]
    pub service: Option<ServiceEntity>,
}

fn default_public() -> bool {
    true
}

impl StoryRecord {
    /// Create a public record with only the required fields set
    #[must_use]
    pub fn new(id: impl Into<StoryId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: None,
            category: None,
            location: None,
            created_at: None,
            is_public: true,
            privacy_level: None,
            traditional_knowledge: false,
            storyteller: None,
            service: None,
        }
    }

    /// Text fed to keyword extraction: title followed by summary
    #[must_use]
    pub fn keyword_text(&self) -> String {
        match &self.summary {
            Some(summary) => format!("{} {}", self.title, summary),
            None => self.title.clone(),
        }
    }

    /// Contributor id, if any
    #[inline]
    #[must_use]
    pub fn contributor_id(&self) -> Option<&ContributorId> {
        self.storyteller.as_ref().map(|c| &c.id)
    }

    /// Community voice: anonymous, or shared at community level
    #[inline]
    #[must_use]
    pub fn is_community_voice(&self) -> bool {
        self.storyteller.is_none() || self.privacy_level.as_deref() == Some("community")
    }

    /// True when the record has a contributor flagged as an elder
    #[inline]
    #[must_use]
    pub fn is_elder_story(&self) -> bool {
        self.storyteller.as_ref().is_some_and(|c| c.is_elder)
    }
}

/// A storyteller profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Unique contributor identifier
    pub id: ContributorId,

    /// Name the person prefers to be shown under
    #[serde(default)]
    pub preferred_name: Option<String>,

    /// Legal or full name
    pub full_name: String,

    /// Whether the person is a recognised elder
    #[serde(default)]
    pub is_elder: bool,

    /// Language group, if recorded
    #[serde(default)]
    pub language_group: Option<String>,

    /// Storyteller type (`youth`, `elder`, `community_member`, ...)
    #[serde(default)]
    pub storyteller_type: Option<String>,
}

impl Contributor {
    /// Create a contributor with only a full name
    #[must_use]
    pub fn new(id: impl Into<ContributorId>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            preferred_name: None,
            full_name: full_name.into(),
            is_elder: false,
            language_group: None,
            storyteller_type: None,
        }
    }

    /// Name to show for this person
    ///
    /// The preferred name wins when present and non-blank, otherwise the full
    /// name is used. Every place that shows a contributor goes through here.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.preferred_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.full_name,
        }
    }

    /// True when the storyteller type is `youth`
    #[inline]
    #[must_use]
    pub fn is_youth(&self) -> bool {
        self.storyteller_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("youth"))
    }
}

/// An organisational service or program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntity {
    /// Unique service identifier
    pub id: ServiceId,

    /// Display name
    pub name: String,
}

impl ServiceEntity {
    /// Create a service
    #[must_use]
    pub fn new(id: impl Into<ServiceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
