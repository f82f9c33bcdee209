// File: crates/rank-core/tests/query.rs
// Purpose: Validate query cache hits, staleness, eviction, and invalidation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rank_core::{QueryCache, QueryError, QueryKey, QueryResult, QuerySpec, Record};

fn keyword_rows() -> Vec<Record> {
    vec![Record::new().with("keyword", "seo audit tool").with("position", 3)]
}

fn counting_spec(key: QueryKey, calls: Arc<AtomicUsize>) -> QuerySpec {
    QuerySpec::new(key, move |_key| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(keyword_rows())
    })
}

#[test]
fn first_access_fetches_second_hits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let spec = counting_spec(QueryKey::new(["projects", "7", "keywords"]), Arc::clone(&calls));
    let mut cache = QueryCache::new(8);

    assert!(matches!(cache.run(&spec).expect("run"), QueryResult::Fetched(_)));
    assert!(matches!(cache.run(&spec).expect("run"), QueryResult::Hit(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.hits, 1);
    assert_eq!(cache.misses, 1);
    assert!((cache.hit_rate() - 0.5).abs() < 1e-9);
}

#[test]
fn disabled_specs_neither_fetch_nor_serve() {
    let calls = Arc::new(AtomicUsize::new(0));
    let spec = counting_spec(QueryKey::new(["projects", "7", "keywords"]), Arc::clone(&calls))
        .enabled(false);
    let mut cache = QueryCache::new(8);

    let result = cache.run(&spec).expect("run");
    assert!(matches!(result, QueryResult::Disabled));
    assert!(result.records().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(cache.is_empty());
}

#[test]
fn stale_entries_are_refetched() {
    let calls = Arc::new(AtomicUsize::new(0));
    let spec = counting_spec(QueryKey::new(["projects", "7", "keywords"]), Arc::clone(&calls))
        .refresh_after(Duration::ZERO);
    let mut cache = QueryCache::new(8);

    assert!(matches!(cache.run(&spec).expect("run"), QueryResult::Fetched(_)));
    // Zero interval: the entry is already stale on the next access.
    assert!(matches!(cache.run(&spec).expect("run"), QueryResult::Fetched(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn fetch_errors_keep_the_stale_entry() {
    let key = QueryKey::new(["projects", "7", "keywords"]);
    let mut cache = QueryCache::new(8);

    let good = QuerySpec::new(key.clone(), |_key| Ok(keyword_rows()));
    cache.run(&good).expect("seed the cache");

    let failing = QuerySpec::new(key.clone(), |_key| anyhow::bail!("backend down"))
        .refresh_after(Duration::ZERO);
    let err = cache.run(&failing).expect_err("fetch should fail");
    match err {
        QueryError::Fetch { key: failed, .. } => assert_eq!(failed, key),
    }

    // The last good entry still serves specs that accept cached data.
    let result = cache.run(&good).expect("run");
    assert!(matches!(result, QueryResult::Hit(_)));
    assert_eq!(result.records().expect("records").len(), 1);
}

#[test]
fn lru_bound_evicts_oldest_key() {
    let mut cache = QueryCache::new(2);
    for project in ["1", "2", "3"] {
        let spec = QuerySpec::new(QueryKey::new(["projects", project]), |_key| Ok(keyword_rows()));
        cache.run(&spec).expect("run");
    }
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.evictions, 1);

    // The first key was evicted; running it again refetches.
    let calls = Arc::new(AtomicUsize::new(0));
    let spec = counting_spec(QueryKey::new(["projects", "1"]), Arc::clone(&calls));
    assert!(matches!(cache.run(&spec).expect("run"), QueryResult::Fetched(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn prefix_invalidation_matches_whole_segments() {
    let mut cache = QueryCache::new(8);
    let keys = [
        QueryKey::new(["projects", "7", "keywords"]),
        QueryKey::new(["projects", "7", "pages"]),
        QueryKey::new(["projects", "71", "keywords"]),
        QueryKey::new(["projects", "8", "keywords"]),
    ];
    for key in &keys {
        let spec = QuerySpec::new(key.clone(), |_key| Ok(keyword_rows()));
        cache.run(&spec).expect("run");
    }

    // "projects/7" must not match "projects/71".
    assert_eq!(cache.invalidate_prefix(&["projects", "7"]), 2);
    assert_eq!(cache.len(), 2);

    let spec = QuerySpec::new(keys[0].clone(), |_key| Ok(keyword_rows()));
    assert!(matches!(cache.run(&spec).expect("run"), QueryResult::Fetched(_)));
}

#[test]
fn predicate_invalidation_reports_removed_count() {
    let mut cache = QueryCache::new(8);
    for segs in [["projects", "7"], ["reports", "weekly"]] {
        let spec = QuerySpec::new(QueryKey::new(segs), |_key| Ok(keyword_rows()));
        cache.run(&spec).expect("run");
    }
    let removed = cache.invalidate(|key| key.segments().first().is_some_and(|s| s == "reports"));
    assert_eq!(removed, 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.invalidate(|_| false), 0);
}

#[test]
fn display_joins_segments_with_slashes() {
    let key = QueryKey::new(["projects", "7", "keywords"]);
    assert_eq!(key.to_string(), "projects/7/keywords");
    assert!(key.starts_with(&["projects"]));
    assert!(key.starts_with(&["projects", "7", "keywords"]));
    assert!(!key.starts_with(&["projects", "7", "keywords", "42"]));
}
