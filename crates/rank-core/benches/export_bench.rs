use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rank_core::{export_csv, export_sheet, Column, ExportOptions, Record};

fn gen_records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            Record::new()
                .with("keyword", format!("keyword phrase {i}"))
                .with("position", (i % 100) as i64 + 1)
                .with("search_volume", (i * 37 % 10_000) as i64)
                .with("serp_features", vec!["featured_snippet", "people_also_ask"])
        })
        .collect()
}

fn columns() -> Vec<Column> {
    vec![
        Column::field("Keyword", "keyword"),
        Column::field("Position", "position"),
        Column::field("Search Volume", "search_volume"),
        Column::field("SERP Features", "serp_features"),
    ]
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let opts = ExportOptions::default();
    for &n in &[100usize, 1_000usize] {
        let records = gen_records(n);
        let cols = columns();
        group.bench_with_input(BenchmarkId::new("csv", n), &records, |b, r| {
            b.iter(|| black_box(export_csv(r, &cols, "bench", &opts).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("xlsx", n), &records, |b, r| {
            b.iter(|| black_box(export_sheet(r, &cols, "bench", &opts).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_export);
criterion_main!(benches);
