//! Matcher and stage throughput benchmarks.
//!
//! Measures the per-record decision path: strict set membership, anchored
//! regex scans with and without the LRU result cache, and whole-batch
//! filtering through a stage.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use filter_engine::{
    FilterAction, FilterStage, MatchConfig, MatchType, PatternMatcher, Record, RecordBatch,
    RegexMatcher, RegexOptions, StrictMatcher,
};

fn candidate_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 4 {
            0 => format!("http.request.{i}"),
            1 => format!("db.query.{i}"),
            2 => format!("health/check/{i}"),
            _ => format!("runtime.metric.{i}"),
        })
        .collect()
}

fn bench_strict_matcher(c: &mut Criterion) {
    let patterns: Vec<String> = (0..500).map(|i| format!("db.query.{i}")).collect();
    let matcher = StrictMatcher::new(patterns);
    let candidates = candidate_names(1000);

    c.bench_function("strict_matcher_1000_candidates", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for candidate in &candidates {
                if matcher.matches(black_box(candidate)) {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });
}

fn bench_regex_matcher(c: &mut Criterion) {
    let patterns = vec![
        "http\\.request\\..*",
        "db\\.query\\.[0-9]+",
        "health/.*",
        "runtime\\.metric\\.[0-9]{1,3}",
    ];
    let candidates = candidate_names(1000);

    let mut group = c.benchmark_group("regex_matcher");
    for (label, options) in [
        ("uncached", RegexOptions::default()),
        (
            "cached",
            RegexOptions {
                cache_enabled: true,
                cache_max_num_entries: 0,
                full_match_required: false,
            },
        ),
    ] {
        let matcher = RegexMatcher::new(&patterns, &options).unwrap();
        group.bench_with_input(
            BenchmarkId::new("1000_candidates", label),
            &matcher,
            |b, matcher| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for candidate in &candidates {
                        if matcher.matches(black_box(candidate)) {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                })
            },
        );
    }
    group.finish();
}

fn bench_filter_stage(c: &mut Criterion) {
    let config = MatchConfig {
        match_type: Some(MatchType::Regexp),
        regex: Some(RegexOptions {
            cache_enabled: true,
            cache_max_num_entries: 1024,
            full_match_required: false,
        }),
    };
    let stage =
        FilterStage::from_name_patterns(["health/.*", "runtime\\..*"], &config, FilterAction::Exclude)
            .unwrap();

    let records: Vec<Record> = candidate_names(1000).into_iter().map(Record::new).collect();

    c.bench_function("filter_stage_batch_1000", |b| {
        b.iter(|| {
            let batch = RecordBatch::with_records("bench-service", records.clone());
            black_box(stage.process_batch(batch))
        })
    });
}

criterion_group!(
    benches,
    bench_strict_matcher,
    bench_regex_matcher,
    bench_filter_stage
);
criterion_main!(benches);
