// File: crates/rank-core/src/types.rs
// Summary: Shared constants (score domain, trend thresholds, sizing limits).

/// Lower bound of the score domain (rank scores, OnPage scores).
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of the score domain.
pub const SCORE_MAX: f64 = 100.0;

/// Slope above which a trend is classified as rising.
pub const TREND_UP_SLOPE: f64 = 0.5;
/// Slope below which a trend is classified as falling.
pub const TREND_DOWN_SLOPE: f64 = -0.5;

/// Hard cap on the number of forecast points, regardless of window length.
pub const FORECAST_CAP: usize = 3;

/// Default trailing window for moving-average annotations.
pub const DEFAULT_ANNOTATION_WINDOW: usize = 3;

/// Column sizing for spreadsheet export, in character cells.
/// Contract: `cap` bounds the measured content width before `pad` is added.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidthLimits {
    pub cap: usize,
    pub pad: usize,
}

impl WidthLimits {
    /// Create new limits.
    pub const fn new(cap: usize, pad: usize) -> Self {
        Self { cap, pad }
    }

    /// Final display width for a measured content width.
    pub const fn fit(&self, measured: usize) -> usize {
        let capped = if measured > self.cap { self.cap } else { measured };
        capped + self.pad
    }
}

impl Default for WidthLimits {
    fn default() -> Self {
        Self::new(50, 2)
    }
}
