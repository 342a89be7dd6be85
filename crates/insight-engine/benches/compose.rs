//! Composition throughput over a synthetic archive

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use insight_engine::{extract_keywords, InsightComposer, InsightConfig};
use insight_model::{Contributor, ServiceEntity, StoryRecord};

const CATEGORIES: &[&str] = &["culture", "health", "youth", "justice", "education", "housing"];
const LOCATIONS: &[&str] = &["Palm Island", "Townsville", "Orpheus Island", "Butler Bay"];
const WORDS: &[&str] = &[
    "community", "elders", "fishing", "language", "healing", "garden", "music", "country",
    "family", "school", "storm", "recovery", "songlines", "reef", "history", "football",
];

fn synthetic(n: usize) -> Vec<StoryRecord> {
    let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let title: Vec<&str> = (0..5).map(|k| WORDS[(i * 7 + k * 3) % WORDS.len()]).collect();
            let mut record = StoryRecord::new(format!("s{i}"), title.join(" "));
            record.summary = Some(format!("{} and the {}", WORDS[i % 11], WORDS[i % 13]));
            record.category = (i % 9 != 0).then(|| CATEGORIES[i % CATEGORIES.len()].to_string());
            record.location = (i % 5 != 0).then(|| LOCATIONS[i % LOCATIONS.len()].to_string());
            record.created_at = (i % 17 != 0).then(|| start + Duration::hours(i as i64 * 2));
            record.traditional_knowledge = i % 4 == 0;
            let mut teller = Contributor::new(format!("p{}", i % 300), format!("Person {}", i % 300));
            teller.is_elder = i % 300 < 40;
            record.storyteller = (i % 6 != 0).then_some(teller);
            record.service = (i % 3 == 0)
                .then(|| ServiceEntity::new(format!("v{}", i % 12), format!("Service {}", i % 12)));
            record
        })
        .collect()
}

fn bench_compose(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
    let composer = InsightComposer::new(InsightConfig::default()).unwrap();

    let mut group = c.benchmark_group("compose");
    for size in [1_000usize, 10_000] {
        let records = synthetic(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| composer.compose(black_box(records), now));
        });
    }
    group.finish();
}

fn bench_keywords(c: &mut Criterion) {
    let records = synthetic(10_000);
    let texts: Vec<String> = records.iter().map(StoryRecord::keyword_text).collect();
    c.bench_function("keywords/10000", |b| {
        b.iter(|| extract_keywords(black_box(&texts), 12));
    });
}

criterion_group!(benches, bench_compose, bench_keywords);
criterion_main!(benches);
