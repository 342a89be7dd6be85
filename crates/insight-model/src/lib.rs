//! Story Insights Data Model
//!
//! Typed records consumed by the aggregation engine and the output units it
//! produces.
//!
//! # Overview
//!
//! - **StoryRecord**: one community story, with its contributor and service
//!   references already resolved
//! - **Contributor**: a storyteller, including the display-name rule
//! - **ServiceEntity**: an organisational service or program
//! - **AggregationBucket / MonthBucket / KeywordEntry**: engine outputs
//! - **StoryRow**: the loosely-typed database row shape, normalised once at
//!   the data-access boundary via [`load_records`]
//!
//! # Example
//!
//! ```rust
//! use insight_model::load_records;
//!
//! let json = r#"[
//!     {"id": "s1", "title": "Fishing at Butler Bay", "story_category": "culture",
//!      "created_at": "2024-03-02T09:30:00Z", "is_public": true}
//! ]"#;
//!
//! let loaded = load_records(json).unwrap();
//! assert_eq!(loaded.records.len(), 1);
//! assert_eq!(loaded.records[0].category.as_deref(), Some("culture"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod id;
pub mod output;
pub mod record;
pub mod row;

// Re-exports
pub use id::{ContributorId, ServiceId, StoryId};
pub use output::{AggregationBucket, KeywordEntry, MonthBucket};
pub use record::{Contributor, ServiceEntity, StoryRecord};
pub use row::{
    load_records, parse_timestamp, LoadError, LoadedRecords, ProfileRow, RowError, ServiceRow,
    StoryRow,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
