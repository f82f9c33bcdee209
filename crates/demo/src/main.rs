// File: crates/demo/src/main.rs
// Summary: Demo runs a keyword collection through the query cache, derives
// table views and chart annotations, and writes date-stamped CSV/xlsx files.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rank_core::trend::samples_from_records;
use rank_core::{
    count_by, export_csv, export_sheet, feature_events, records_from_json, retain_matching,
    sort_by_column, Annotation, AnnotationParams, Column, ExportOptions, FeatureSnapshot, Filter,
    MovingAverageAnnotation, QueryCache, QueryKey, QuerySpec, Record, Scalar, SortDirection,
    TrendAnnotation, TrendSummary,
};

// REST-shaped payloads as the backend returns them.
const KEYWORDS_JSON: &str = include_str!("keywords.json");
const HISTORY_JSON: &str = include_str!("history.json");

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut cache = QueryCache::new(32);

    let keywords_spec = QuerySpec::new(QueryKey::new(["projects", "7", "keywords"]), |_key| {
        let body: serde_json::Value =
            serde_json::from_str(KEYWORDS_JSON).context("parsing keywords payload")?;
        Ok(records_from_json(&body))
    });
    let history_spec = QuerySpec::new(
        QueryKey::new(["projects", "7", "keywords", "42", "history"]),
        |_key| {
            let body: serde_json::Value =
                serde_json::from_str(HISTORY_JSON).context("parsing history payload")?;
            Ok(records_from_json(&body))
        },
    );

    // First access fetches, second is served from cache.
    let keywords = cache
        .run(&keywords_spec)?
        .records()
        .context("keywords query disabled")?
        .as_ref()
        .clone();
    cache.run(&keywords_spec)?;
    println!(
        "Loaded {} keywords (cache hit rate {:.0}%)",
        keywords.len(),
        cache.hit_rate() * 100.0
    );

    // Derived view: first-page keywords, best position first.
    let mut first_page = keywords.clone();
    retain_matching(
        &mut first_page,
        &[Filter::NumberRange {
            field: "position".to_string(),
            min: None,
            max: Some(10.0),
        }],
    );
    let position = Column::field("Position", "position");
    sort_by_column(&mut first_page, &position, SortDirection::Ascending);
    println!("First-page keywords: {}", first_page.len());

    for (feature, count) in count_by(&keywords, "serp_features") {
        println!("  SERP feature {feature}: {count} keywords");
    }

    // Chart math over one keyword's score history.
    let history = cache
        .run(&history_spec)?
        .records()
        .context("history query disabled")?
        .as_ref()
        .clone();
    let samples = samples_from_records(&history, "date", "score");
    let summary = TrendSummary::of(&samples);
    println!(
        "Trend: slope {:.2}/sample ({}), change {:.1}%",
        summary.line.slope,
        summary.direction.label(),
        summary.change.value
    );

    let params = AnnotationParams::default();
    for annotation in [&TrendAnnotation as &dyn Annotation, &MovingAverageAnnotation] {
        let points = annotation.compute(&samples, &params);
        println!("Annotation '{}': {} points", annotation.id(), points.len());
    }

    // SERP feature history for the same keyword.
    for event in feature_events(&feature_snapshots(&history)) {
        println!("  {} {} {}", event.date, event.change.label(), event.feature);
    }

    // Export the keyword table both ways.
    let columns = keyword_columns();
    let opts = ExportOptions {
        sheet_name: "Keywords".to_string(),
        ..ExportOptions::default()
    };
    let out_dir = "target/out";
    if let Some(file) = export_csv(&keywords, &columns, "keywords", &opts)? {
        let path = file.save_to(out_dir).context("saving csv export")?;
        println!("Wrote {}", path.display());
    }
    if let Some(file) = export_sheet(&keywords, &columns, "keywords", &opts)? {
        let path = file.save_to(out_dir).context("saving sheet export")?;
        println!("Wrote {}", path.display());
    }

    // After a mutation the project subtree is dropped; next access refetches.
    let removed = cache.invalidate_prefix(&["projects", "7"]);
    println!("Invalidated {removed} cached queries");

    Ok(())
}

/// Column preset for the keyword table's export buttons.
fn keyword_columns() -> Vec<Column> {
    vec![
        Column::field("Keyword", "keyword"),
        Column::field("Position", "position"),
        Column::field("Search Volume", "search_volume"),
        Column::field("SERP Features", "serp_features"),
        Column::derived("Top 3", |r| {
            Scalar::Bool(r.field("position").as_number().is_some_and(|p| p <= 3.0))
        }),
        Column::field("Score", "score").with_format(|cell| match cell.as_number() {
            Some(v) => format!("{v:.1}"),
            None => cell.display(),
        }),
    ]
}

/// Rebuild dated feature sets from history rows carrying a feature list.
fn feature_snapshots(history: &[Record]) -> Vec<FeatureSnapshot> {
    let mut snapshots: Vec<FeatureSnapshot> = history
        .iter()
        .filter_map(|r| {
            let date = match r.field("date") {
                Scalar::Text(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()?,
                _ => return None,
            };
            let features = match r.field("serp_features") {
                Scalar::List(items) => items.iter().map(Scalar::display).collect::<Vec<_>>(),
                _ => Vec::new(),
            };
            Some(FeatureSnapshot::new(date, features))
        })
        .collect();
    snapshots.sort_by_key(|s| s.date);
    snapshots
}
