// File: crates/rank-examples/src/bin/trend.rs
// Summary: Minimal example that fits a trend line over a score history.

use chrono::NaiveDate;
use rank_core::{classify_slope, fit_trend, ScoreSample};

fn main() {
    // Eight weekly OnPage score samples
    let start = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
    let scores = [61.0, 63.5, 62.0, 66.4, 69.8, 71.2, 70.5, 74.9];
    let samples: Vec<ScoreSample> = scores
        .iter()
        .enumerate()
        .map(|(i, &score)| ScoreSample::new(start + chrono::Duration::weeks(i as i64), score))
        .collect();

    let line = fit_trend(&samples);
    println!(
        "slope {:.3}/sample, intercept {:.1}, trend {}",
        line.slope,
        line.intercept,
        classify_slope(line.slope).label()
    );
    for point in &line.forecast {
        println!("forecast {} -> {:.1}", point.date, point.value);
    }
}
