//! Search performance benchmarks.
//!
//! Measures row lookup and set combination across dataset sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use veritable::{Predicates, Registry};

/// Generate a synthetic grid with the given number of data rows.
fn generate_grid(rows: usize) -> Vec<Vec<String>> {
    let mut grid = vec![vec![
        "id".to_string(),
        "group".to_string(),
        "value".to_string(),
    ]];

    for row in 0..rows {
        grid.push(vec![
            format!("ID_{:06}", row),
            format!("group_{}", row % 10),
            format!("{}", row % 100),
        ]);
    }

    grid
}

fn bench_find_first_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_first_row");

    for rows in [100, 1_000, 10_000] {
        let mut registry = Registry::new();
        let id = registry.register(generate_grid(rows)).unwrap();
        let ds = registry.dataset(id).unwrap();
        // Worst case: the match is in the last row
        let target = format!("ID_{:06}", rows - 1);

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| ds.find_first_row(black_box(1), black_box(&target)));
        });
    }

    group.finish();
}

fn bench_find_all_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_all_rows");

    for rows in [100, 1_000, 10_000] {
        let mut registry = Registry::new();
        let id = registry.register(generate_grid(rows)).unwrap();
        let ds = registry.dataset(id).unwrap();

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| ds.find_all_rows(black_box(2), black_box("group_3")));
        });
    }

    group.finish();
}

fn bench_intersect(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_rows_intersect");

    for rows in [1_000, 10_000] {
        let mut registry = Registry::new();
        let id = registry.register(generate_grid(rows)).unwrap();
        let ds = registry.dataset(id).unwrap();

        let mut predicates = Predicates::new();
        predicates.insert(2, "group_3".to_string());
        predicates.insert(3, "13".to_string());

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| ds.find_rows_intersect(black_box(&predicates)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_first_row, bench_find_all_rows, bench_intersect);
criterion_main!(benches);
