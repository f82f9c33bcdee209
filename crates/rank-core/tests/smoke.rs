// File: crates/rank-core/tests/smoke.rs
// Purpose: Basic end-to-end export smoke test writing CSV and xlsx files.

use rank_core::{export_csv, export_sheet, Column, ExportOptions, Record};

fn rows() -> Vec<Record> {
    vec![
        Record::new().with("keyword", "seo audit tool").with("position", 3),
        Record::new().with("keyword", "rank tracker").with("position", 7),
    ]
}

fn columns() -> Vec<Column> {
    vec![
        Column::field("Keyword", "keyword"),
        Column::field("Position", "position"),
    ]
}

#[test]
fn export_smoke() {
    let opts = ExportOptions::default();
    let out = std::path::PathBuf::from("target/test_out");

    let csv_file = export_csv(&rows(), &columns(), "keywords", &opts)
        .expect("csv export should succeed")
        .expect("non-empty input produces a file");
    assert!(csv_file.name.ends_with(".csv"));
    let text = String::from_utf8(csv_file.bytes.clone()).expect("csv is utf-8");
    assert_eq!(text.lines().count(), 3, "header + 2 rows");

    let path = csv_file.save_to(&out).expect("save csv");
    let meta = std::fs::metadata(&path).expect("output exists");
    assert!(meta.len() > 0, "csv should be non-empty");

    let sheet_file = export_sheet(&rows(), &columns(), "keywords", &opts)
        .expect("sheet export should succeed")
        .expect("non-empty input produces a file");
    assert!(sheet_file.name.ends_with(".xlsx"));
    assert!(sheet_file.bytes.starts_with(b"PK"), "xlsx is a zip container");
    sheet_file.save_to(&out).expect("save xlsx");
}
