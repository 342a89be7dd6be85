//! Cultural metrics

use crate::as_record;
use insight_model::StoryRecord;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;

/// Counts shown on the cultural metrics cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CulturalMetrics {
    /// Records told by an elder
    pub elder_story_count: usize,
    /// Records flagged as traditional knowledge
    pub traditional_knowledge_count: usize,
    /// Distinct contributor ids
    pub unique_contributor_count: usize,
    /// Distinct language groups among referenced contributors
    pub unique_language_group_count: usize,
}

/// Summarise cultural metrics in a single pass
///
/// Anonymous records count as not elder-authored.
pub fn summarize_cultural_metrics<R: Borrow<StoryRecord>>(records: &[R]) -> CulturalMetrics {
    let mut metrics = CulturalMetrics::default();
    let mut contributors = HashSet::new();
    let mut language_groups = HashSet::new();

    for record in records {
        let record = as_record(record);
        if record.traditional_knowledge {
            metrics.traditional_knowledge_count += 1;
        }
        let Some(storyteller) = record.storyteller.as_ref() else {
            continue;
        };
        if storyteller.is_elder {
            metrics.elder_story_count += 1;
        }
        contributors.insert(&storyteller.id);
        if let Some(group) = storyteller.language_group.as_deref() {
            language_groups.insert(group);
        }
    }

    metrics.unique_contributor_count = contributors.len();
    metrics.unique_language_group_count = language_groups.len();
    metrics
}
