// File: crates/rank-core/src/view.rs
// Summary: Derived table views: sorting, filtering, summary aggregation.
// Notes:
// - Everything here derives a fresh view per call; nothing mutates cached
//   collections in place except through the caller's own Vec.
// - Mixed-type ordering: numbers, then text, then bools, then lists; Null
//   sorts last in both directions.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::column::Column;
use crate::record::{Record, Scalar};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

fn type_rank(cell: &Scalar) -> u8 {
    match cell {
        Scalar::Number(_) => 0,
        Scalar::Text(_) => 1,
        Scalar::Bool(_) => 2,
        Scalar::List(_) => 3,
        Scalar::Null => 4,
    }
}

fn compare_cells(a: &Scalar, b: &Scalar) -> Ordering {
    match (a, b) {
        (Scalar::Number(x), Scalar::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Scalar::Text(x), Scalar::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Scalar::Bool(x), Scalar::Bool(y)) => x.cmp(y),
        (Scalar::List(_), Scalar::List(_)) => a.display().cmp(&b.display()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Stable sort on the resolved cell of `column`. Numbers sort numerically,
/// text case-insensitively, bools false before true, lists by display
/// string. Null cells sort last regardless of direction, and a failing
/// derive accessor resolves to Null rather than aborting the sort.
pub fn sort_by_column(records: &mut [Record], column: &Column, direction: SortDirection) {
    let resolve = |r: &Record| column.cell(r).unwrap_or(Scalar::Null);
    records.sort_by(|a, b| {
        let (ca, cb) = (resolve(a), resolve(b));
        match (ca.is_null(), cb.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = compare_cells(&ca, &cb);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
        }
    });
}

/// One table filter; a row must match every filter in the set (AND).
#[derive(Clone, Debug)]
pub enum Filter {
    /// Cell equals the given scalar exactly.
    Equals { field: String, value: Scalar },
    /// Case-insensitive substring match on the cell's display string.
    Contains { field: String, needle: String },
    /// Inclusive numeric range; either bound may be open.
    NumberRange { field: String, min: Option<f64>, max: Option<f64> },
    /// Cell is present and not Null.
    HasValue { field: String },
}

impl Filter {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::Equals { field, value } => record.field(field) == *value,
            Filter::Contains { field, needle } => record
                .field(field)
                .display()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Filter::NumberRange { field, min, max } => match record.field(field).as_number() {
                Some(v) => min.map_or(true, |lo| v >= lo) && max.map_or(true, |hi| v <= hi),
                None => false,
            },
            Filter::HasValue { field } => !record.field(field).is_null(),
        }
    }
}

/// Keep only the rows matching all filters.
pub fn retain_matching(records: &mut Vec<Record>, filters: &[Filter]) {
    records.retain(|r| filters.iter().all(|f| f.matches(r)));
}

/// Count rows per distinct display value of `field`, descending by count
/// then ascending by value. List cells count each element separately (tag
/// fields such as SERP feature arrays); Null cells are skipped.
pub fn count_by(records: &[Record], field: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        match record.field(field) {
            Scalar::Null => {}
            Scalar::List(items) => {
                for item in &items {
                    if !item.is_null() {
                        *counts.entry(item.display()).or_default() += 1;
                    }
                }
            }
            other => *counts.entry(other.display()).or_default() += 1,
        }
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

fn numbers_of<'a>(records: &'a [Record], field: &'a str) -> impl Iterator<Item = f64> + 'a {
    records.iter().filter_map(move |r| r.field(field).as_number())
}

/// Mean over numeric cells of `field`; `None` when no cell is numeric.
pub fn mean_of(records: &[Record], field: &str) -> Option<f64> {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for v in numbers_of(records, field) {
        sum += v;
        count += 1;
    }
    if count == 0 { None } else { Some(sum / count as f64) }
}

/// Sum over numeric cells of `field`; non-numeric and Null cells contribute
/// nothing.
pub fn sum_of(records: &[Record], field: &str) -> f64 {
    numbers_of(records, field).sum()
}

/// Min and max over numeric cells of `field`; `None` when no cell is
/// numeric.
pub fn min_max_of(records: &[Record], field: &str) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut any = false;
    for v in numbers_of(records, field) {
        min = min.min(v);
        max = max.max(v);
        any = true;
    }
    if any { Some((min, max)) } else { None }
}
