//! Criterion benchmarks for the chart reducers

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dishhub_admin::services::{bucket_by_month, Aggregator, PageState};
use dishhub_admin::types::{CategoryRecord, UserRecord};
use std::hint::black_box;

const SIZES: &[usize] = &[1_000, 10_000, 100_000];

fn make_records(n: usize) -> Vec<CategoryRecord> {
    (0..n)
        .map(|i| CategoryRecord {
            id: i as i64,
            name: format!("item-{}", i),
            quantity: (i % 7) as i64 + 1,
            category: (i % 12).to_string(),
        })
        .collect()
}

/// Mix of RFC 3339, naive and broken timestamps
fn make_users(n: usize) -> Vec<UserRecord> {
    (0..n)
        .map(|i| {
            let month = i % 12 + 1;
            let created_at = match i % 3 {
                0 => format!("2024-{:02}-15T08:30:00Z", month),
                1 => format!("2024-{:02}-15 08:30:00", month),
                _ if i % 50 == 2 => "garbage".to_string(),
                _ => format!("2024-{:02}-15T08:30:00.123456+03:00", month),
            };
            UserRecord {
                id: i as i64,
                email: format!("user{}@dishhub.test", i),
                first_name: "User".into(),
                last_name: i.to_string(),
                username: format!("user{}", i),
                created_at,
            }
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for &n in SIZES {
        let records = make_records(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &records, |b, records| {
            b.iter(|| Aggregator::aggregate(black_box(records)));
        });
    }
    group.finish();
}

fn bench_bucket_by_month(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket_by_month");
    for &n in SIZES {
        let users = make_users(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &users, |b, users| {
            b.iter(|| bucket_by_month(black_box(users)));
        });
    }
    group.finish();
}

fn bench_replace_items(c: &mut Criterion) {
    let users = make_users(10_000);
    c.bench_function("page_state_replace_items_10000", |b| {
        b.iter(|| {
            let mut pages = PageState::new(15);
            pages.replace_items(black_box(users.clone()));
            pages.page_count()
        });
    });
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_bucket_by_month,
    bench_replace_items
);
criterion_main!(benches);
