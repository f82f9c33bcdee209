// File: crates/rank-core/src/trend.rs
// Summary: Least-squares trend line, clamped forecast, direction classification.

use chrono::{Duration, NaiveDate};

use crate::compare::{percent_change, PercentChange};
use crate::record::Record;
use crate::types::{FORECAST_CAP, SCORE_MAX, SCORE_MIN, TREND_DOWN_SLOPE, TREND_UP_SLOPE};

/// One dated score sample (rank score, OnPage score, visibility score...).
/// Score domain is [0, 100] in practice; the fit does not enforce it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreSample {
    pub date: NaiveDate,
    pub score: f64,
}

impl ScoreSample {
    pub fn new(date: NaiveDate, score: f64) -> Self {
        Self { date, score }
    }
}

/// Extract date-ordered samples from a fetched collection. Rows whose date
/// field is not `YYYY-MM-DD` or whose score field is not numeric are skipped.
pub fn samples_from_records(records: &[Record], date_field: &str, score_field: &str) -> Vec<ScoreSample> {
    let mut samples: Vec<ScoreSample> = records
        .iter()
        .filter_map(|r| {
            let date = match r.field(date_field) {
                crate::record::Scalar::Text(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()?,
                _ => return None,
            };
            let score = r.field(score_field).as_number()?;
            Some(ScoreSample::new(date, score))
        })
        .collect();
    samples.sort_by_key(|s| s.date);
    samples
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }
}

/// One extrapolated point past the observed window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Fitted line over the sample window plus its forecast tail.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub forecast: Vec<ForecastPoint>,
}

impl TrendLine {
    /// Fitted value at a sample index.
    pub fn at(&self, index: usize) -> f64 {
        self.intercept + self.slope * index as f64
    }
}

/// Ordinary least squares of score against sample index `0..n`.
/// The fit is index-based: the calendar gap between samples does not weight
/// it, so a window with irregular sampling is treated as evenly spaced.
///
/// Fewer than 2 points: slope 0, intercept = the only score (or 0), no
/// forecast. Otherwise the forecast holds `min(3, ceil(n/4))` points, each
/// clamped to [0, 100], dated past the last sample at the stride of the last
/// observed gap (1 day when that gap is zero).
pub fn fit_trend(samples: &[ScoreSample]) -> TrendLine {
    let n = samples.len();
    if n < 2 {
        return TrendLine {
            slope: 0.0,
            intercept: samples.first().map_or(0.0, |s| s.score),
            forecast: Vec::new(),
        };
    }

    let nf = n as f64;
    let mut sum_i = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut sum_iy = 0.0f64;
    let mut sum_ii = 0.0f64;
    for (i, s) in samples.iter().enumerate() {
        let x = i as f64;
        sum_i += x;
        sum_y += s.score;
        sum_iy += x * s.score;
        sum_ii += x * x;
    }

    // Indices are distinct, so the denominator is nonzero for n >= 2.
    let denom = nf * sum_ii - sum_i * sum_i;
    let slope = (nf * sum_iy - sum_i * sum_y) / denom;
    let intercept = (sum_y - slope * sum_i) / nf;

    let horizon = FORECAST_CAP.min(n.div_ceil(4));
    let last = samples[n - 1];
    let mut stride = (last.date - samples[n - 2].date).num_days();
    if stride <= 0 {
        stride = 1;
    }

    let mut forecast = Vec::with_capacity(horizon);
    for k in 1..=horizon {
        let date = match last.date.checked_add_signed(Duration::days(stride * k as i64)) {
            Some(d) => d,
            None => break,
        };
        let value = (intercept + slope * (n - 1 + k) as f64).clamp(SCORE_MIN, SCORE_MAX);
        forecast.push(ForecastPoint { date, value });
    }

    TrendLine { slope, intercept, forecast }
}

/// Fixed-threshold direction classification.
pub fn classify_slope(slope: f64) -> TrendDirection {
    if slope > TREND_UP_SLOPE {
        TrendDirection::Up
    } else if slope < TREND_DOWN_SLOPE {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}

/// Everything a chart header needs in one call: fitted line, direction, and
/// first-to-last percent change over the window.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendSummary {
    pub line: TrendLine,
    pub direction: TrendDirection,
    pub change: PercentChange,
}

impl TrendSummary {
    pub fn of(samples: &[ScoreSample]) -> Self {
        let line = fit_trend(samples);
        let direction = classify_slope(line.slope);
        let change = percent_change(samples);
        Self { line, direction, change }
    }
}
