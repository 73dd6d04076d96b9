//! Analysis benchmarks over a large synthetic inventory.

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pantry_core::{Category, ItemId};
use pantry_inventory::{
    analyze_inventory, AnalysisConfig, AnalyticsSnapshot, CrisisState, DemandProfile, InventoryItem,
    InventorySnapshot, PriorityScorer,
};

const CATEGORIES: [Category; 6] = [
    Category::Protein,
    Category::Grain,
    Category::Fruit,
    Category::Dairy,
    Category::Vegetable,
    Category::Canned,
];

fn snapshot(size: usize) -> InventorySnapshot {
    let reference = Utc.with_ymd_and_hms(2025, 11, 16, 0, 0, 0).unwrap();
    let items = (0..size)
        .map(|i| {
            let id = ItemId::new(format!("inv_{i:06}")).unwrap();
            InventoryItem::new(id, format!("item {i}"), CATEGORIES[i % CATEGORIES.len()].clone(), (i % 97) as f64)
                .with_best_by(reference + Duration::days((i % 30) as i64 - 5))
                .with_weight((i % 13) as f64)
        })
        .collect();
    let analytics = AnalyticsSnapshot {
        demand: DemandProfile::default(),
        crisis: Some(CrisisState::active("winter_storm", 2.5)),
    };
    InventorySnapshot::new(items, analytics)
}

fn bench_analysis(c: &mut Criterion) {
    let reference = Utc.with_ymd_and_hms(2025, 11, 16, 0, 0, 0).unwrap();
    let config = AnalysisConfig::default();
    let mut group = c.benchmark_group("analysis");

    for size in [1_000usize, 10_000, 100_000] {
        let snap = snapshot(size);

        group.bench_with_input(BenchmarkId::new("analyze_inventory", size), &snap, |b, snap| {
            b.iter(|| analyze_inventory(black_box(snap), reference, &config))
        });

        group.bench_with_input(BenchmarkId::new("rank_priority", size), &snap, |b, snap| {
            b.iter(|| {
                PriorityScorer.rank(
                    black_box(&snap.items),
                    &snap.analytics.demand,
                    snap.analytics.active_crisis(),
                    reference,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analysis);
criterion_main!(benches);
