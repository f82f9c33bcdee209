// File: crates/rank-core/src/lib.rs
// Summary: Core library entry point; exports the record model, derived views,
// trend math, SERP feature history, export, and the query cache.

pub mod annotate;
pub mod column;
pub mod compare;
pub mod error;
pub mod export;
pub mod query;
pub mod record;
pub mod serp;
pub mod trend;
pub mod types;
pub mod view;

pub use annotate::{Annotation, AnnotationParams, AnnotationPoint, MovingAverageAnnotation, TrendAnnotation};
pub use column::{Accessor, Column};
pub use compare::{moving_average, percent_change, period_over_period, PercentChange, PeriodComparison};
pub use error::{ExportError, QueryError};
pub use export::{export_csv, export_sheet, ExportFile, ExportOptions};
pub use query::{QueryCache, QueryKey, QueryResult, QuerySpec};
pub use record::{records_from_json, Record, Scalar};
pub use serp::{feature_events, FeatureChange, FeatureEvent, FeatureSnapshot};
pub use trend::{classify_slope, fit_trend, ForecastPoint, ScoreSample, TrendDirection, TrendLine, TrendSummary};
pub use view::{count_by, mean_of, min_max_of, retain_matching, sort_by_column, sum_of, Filter, SortDirection};
