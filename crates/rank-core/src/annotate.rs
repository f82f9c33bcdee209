// File: crates/rank-core/src/annotate.rs
// Summary: Annotation trait turning sample series into chart overlay points.

use chrono::NaiveDate;

use crate::compare::moving_average;
use crate::trend::{fit_trend, ScoreSample};
use crate::types::DEFAULT_ANNOTATION_WINDOW;

#[derive(Clone, Copy, Debug)]
pub struct AnnotationParams {
    pub window: usize,
}

impl Default for AnnotationParams {
    fn default() -> Self {
        Self { window: DEFAULT_ANNOTATION_WINDOW }
    }
}

/// One overlay point on the score chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnnotationPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// An annotation derives an overlay point series from the chart's samples.
pub trait Annotation {
    fn id(&self) -> &'static str;
    fn compute(&self, samples: &[ScoreSample], params: &AnnotationParams) -> Vec<AnnotationPoint>;
}

/// Fitted trend line evaluated at each sample date, followed by the
/// forecast tail.
pub struct TrendAnnotation;

impl Annotation for TrendAnnotation {
    fn id(&self) -> &'static str {
        "trend"
    }

    fn compute(&self, samples: &[ScoreSample], _params: &AnnotationParams) -> Vec<AnnotationPoint> {
        let line = fit_trend(samples);
        let mut points: Vec<AnnotationPoint> = samples
            .iter()
            .enumerate()
            .map(|(i, s)| AnnotationPoint { date: s.date, value: line.at(i) })
            .collect();
        points.extend(
            line.forecast
                .iter()
                .map(|f| AnnotationPoint { date: f.date, value: f.value }),
        );
        points
    }
}

/// Trailing moving average of the scores; emits points only where the
/// average is defined (full window of history).
pub struct MovingAverageAnnotation;

impl Annotation for MovingAverageAnnotation {
    fn id(&self) -> &'static str {
        "moving_average"
    }

    fn compute(&self, samples: &[ScoreSample], params: &AnnotationParams) -> Vec<AnnotationPoint> {
        let scores: Vec<f64> = samples.iter().map(|s| s.score).collect();
        moving_average(&scores, params.window)
            .into_iter()
            .zip(samples)
            .filter_map(|(avg, s)| avg.map(|value| AnnotationPoint { date: s.date, value }))
            .collect()
    }
}
