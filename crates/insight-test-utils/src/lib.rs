//! Testing utilities for the story insights workspace
//!
//! Shared fixtures and builders.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use insight_model::{Contributor, ServiceEntity, StoryRecord};

/// Fixed reference instant used across tests: midday UTC on 2024-06-15
pub fn reference_now() -> DateTime<Utc> {
    at(2024, 6, 15)
}

/// Midday UTC on the given date
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
}

pub fn contributor(id: &str, name: &str) -> Contributor {
    Contributor::new(id, name)
}

pub fn elder(id: &str, name: &str) -> Contributor {
    let mut c = Contributor::new(id, name);
    c.is_elder = true;
    c
}

pub fn service(id: &str, name: &str) -> ServiceEntity {
    ServiceEntity::new(id, name)
}

/// Fluent builder for [`StoryRecord`]
#[derive(Debug, Clone)]
pub struct StoryBuilder {
    record: StoryRecord,
}

impl StoryBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            record: StoryRecord::new(id, format!("Story {id}")),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.record.title = title.to_string();
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.record.summary = Some(summary.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.record.category = Some(category.to_string());
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.record.location = Some(location.to_string());
        self
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.record.created_at = Some(at);
        self
    }

    pub fn undated(mut self) -> Self {
        self.record.created_at = None;
        self
    }

    pub fn private(mut self) -> Self {
        self.record.is_public = false;
        self
    }

    pub fn privacy_level(mut self, level: &str) -> Self {
        self.record.privacy_level = Some(level.to_string());
        self
    }

    pub fn traditional_knowledge(mut self) -> Self {
        self.record.traditional_knowledge = true;
        self
    }

    pub fn told_by(mut self, contributor: &Contributor) -> Self {
        self.record.storyteller = Some(contributor.clone());
        self
    }

    pub fn for_service(mut self, service: &ServiceEntity) -> Self {
        self.record.service = Some(service.clone());
        self
    }

    pub fn build(self) -> StoryRecord {
        self.record
    }
}

pub fn story(id: &str) -> StoryBuilder {
    StoryBuilder::new(id)
}

/// A small, varied community data set dated around [`reference_now`]
pub fn community_fixture() -> Vec<StoryRecord> {
    let mut val = elder("p-val", "Valerie Johnson");
    val.preferred_name = Some("Aunty Val".to_string());
    val.language_group = Some("Manbarra".to_string());
    let mut tom = contributor("p-tom", "Tom Palmer");
    tom.language_group = Some("Bwgcolman".to_string());
    let mut kira = contributor("p-kira", "Kira Walker");
    kira.storyteller_type = Some("youth".to_string());

    let health = service("v-health", "Primary Health Centre");
    let mens = service("v-mens", "Men's Program");

    vec![
        story("s1")
            .title("Elders share stories of Hull River")
            .summary("Traditional knowledge passed down through generations")
            .category("culture")
            .location("Palm Island")
            .created(at(2024, 6, 2))
            .traditional_knowledge()
            .told_by(&val)
            .build(),
        story("s2")
            .title("Community garden harvest")
            .summary("Fresh food for families and elders")
            .category("health")
            .location("Palm Island")
            .created(at(2024, 5, 20))
            .told_by(&tom)
            .for_service(&health)
            .build(),
        story("s3")
            .title("Men's group fishing trip")
            .category("culture")
            .location("Orpheus Island")
            .created(at(2024, 5, 3))
            .told_by(&tom)
            .for_service(&mens)
            .build(),
        story("s4")
            .title("Youth music workshop")
            .summary("Young people recording songs about community")
            .category("youth")
            .created(at(2024, 3, 11))
            .told_by(&kira)
            .build(),
        story("s5")
            .title("Storm recovery community")
            .summary("Families rebuilding after the floods")
            .location("Palm Island")
            .created(at(2024, 2, 14))
            .for_service(&health)
            .build(),
        story("s6")
            .title("Songlines of the reef")
            .category("culture")
            .undated()
            .traditional_knowledge()
            .told_by(&val)
            .build(),
    ]
}
