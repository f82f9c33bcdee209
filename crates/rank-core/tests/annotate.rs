// File: crates/rank-core/tests/annotate.rs
// Purpose: Validate annotation overlay series: trend line plus forecast
// tail, and moving-average points only where the window is full.

use chrono::NaiveDate;
use rank_core::{
    fit_trend, Annotation, AnnotationParams, MovingAverageAnnotation, ScoreSample,
    TrendAnnotation,
};

fn daily_samples(scores: &[f64]) -> Vec<ScoreSample> {
    let start = NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date");
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| ScoreSample::new(start + chrono::Duration::days(i as i64), score))
        .collect()
}

#[test]
fn trend_annotation_covers_samples_then_forecast() {
    let samples = daily_samples(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let line = fit_trend(&samples);
    let points = TrendAnnotation.compute(&samples, &AnnotationParams::default());

    // One fitted point per sample date, then exactly the forecast tail.
    assert_eq!(points.len(), samples.len() + line.forecast.len());
    for (i, sample) in samples.iter().enumerate() {
        assert_eq!(points[i].date, sample.date);
        assert!((points[i].value - line.at(i)).abs() < 1e-9);
    }
    for (point, forecast) in points[samples.len()..].iter().zip(&line.forecast) {
        assert_eq!(point.date, forecast.date);
        assert!((point.value - forecast.value).abs() < 1e-9);
    }

    // Unit slope through 1..5: fitted values coincide with the scores.
    for (point, sample) in points.iter().zip(&samples) {
        assert!((point.value - sample.score).abs() < 1e-9);
    }
}

#[test]
fn trend_annotation_degenerate_window_has_no_forecast() {
    let samples = daily_samples(&[42.0]);
    let points = TrendAnnotation.compute(&samples, &AnnotationParams::default());
    assert_eq!(points.len(), 1);
    assert!((points[0].value - 42.0).abs() < 1e-9);
}

#[test]
fn moving_average_annotation_skips_short_history() {
    let samples = daily_samples(&[10.0, 20.0, 30.0, 40.0]);
    let points = MovingAverageAnnotation.compute(&samples, &AnnotationParams::default());

    // Default window is 3: the first two samples have no average.
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].date, samples[2].date);
    assert!((points[0].value - 20.0).abs() < 1e-9);
    assert_eq!(points[1].date, samples[3].date);
    assert!((points[1].value - 30.0).abs() < 1e-9);
}

#[test]
fn moving_average_annotation_honors_custom_window() {
    let samples = daily_samples(&[10.0, 20.0, 30.0, 40.0]);
    let points = MovingAverageAnnotation.compute(&samples, &AnnotationParams { window: 2 });
    assert_eq!(points.len(), 3);
    assert!((points[0].value - 15.0).abs() < 1e-9);

    let none = MovingAverageAnnotation.compute(&samples, &AnnotationParams { window: 5 });
    assert!(none.is_empty());
}

#[test]
fn annotation_ids_are_distinct() {
    assert_eq!(TrendAnnotation.id(), "trend");
    assert_eq!(MovingAverageAnnotation.id(), "moving_average");
}
