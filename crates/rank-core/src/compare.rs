// File: crates/rank-core/src/compare.rs
// Summary: Guarded percent change, trailing moving average, period-over-period.

use crate::trend::ScoreSample;

/// Percent change with an explicit zero-baseline guard.
/// Contract: when the baseline is 0 the value is 0.0 and `zero_baseline` is
/// set; no NaN or Infinity can escape this type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PercentChange {
    pub value: f64,
    pub zero_baseline: bool,
}

impl PercentChange {
    /// `(current - baseline) / baseline * 100`, guarded.
    pub fn between(baseline: f64, current: f64) -> Self {
        if baseline == 0.0 {
            Self { value: 0.0, zero_baseline: true }
        } else {
            Self {
                value: (current - baseline) / baseline * 100.0,
                zero_baseline: false,
            }
        }
    }

    fn zero() -> Self {
        Self { value: 0.0, zero_baseline: false }
    }
}

/// First-to-last percent change over a sample window. Fewer than 2 points
/// is a 0% change.
pub fn percent_change(samples: &[ScoreSample]) -> PercentChange {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) if samples.len() >= 2 => {
            PercentChange::between(first.score, last.score)
        }
        _ => PercentChange::zero(),
    }
}

/// Trailing moving average over `window` values, incremental running sum.
/// Output has the same length as the input; indices with fewer than `window`
/// values of history (and everything when `window` is 0) are `None`.
pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0f64;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i + 1 >= window {
            if i + 1 > window {
                sum -= values[i - window];
            }
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

/// Means of the two halves of a window plus the change between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodComparison {
    pub previous_mean: f64,
    pub current_mean: f64,
    pub change: PercentChange,
}

/// Split the window at `floor(n/2)`: previous period is the first half,
/// current period the second (odd n gives the current period the extra
/// point). `None` when fewer than 2 points or either half would be empty.
pub fn period_over_period(samples: &[ScoreSample]) -> Option<PeriodComparison> {
    let n = samples.len();
    if n < 2 {
        return None;
    }
    let (previous, current) = samples.split_at(n / 2);
    if previous.is_empty() || current.is_empty() {
        return None;
    }
    let previous_mean = previous.iter().map(|s| s.score).sum::<f64>() / previous.len() as f64;
    let current_mean = current.iter().map(|s| s.score).sum::<f64>() / current.len() as f64;
    Some(PeriodComparison {
        previous_mean,
        current_mean,
        change: PercentChange::between(previous_mean, current_mean),
    })
}
