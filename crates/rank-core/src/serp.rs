// File: crates/rank-core/src/serp.rs
// Summary: SERP feature change history: gained/lost events across snapshots.

use std::collections::HashSet;

use chrono::NaiveDate;

/// The feature labels present on one SERP snapshot date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureSnapshot {
    pub date: NaiveDate,
    pub features: HashSet<String>,
}

impl FeatureSnapshot {
    pub fn new(date: NaiveDate, features: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            date,
            features: features.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureChange {
    Gained,
    Lost,
}

impl FeatureChange {
    pub fn label(&self) -> &'static str {
        match self {
            FeatureChange::Gained => "gained",
            FeatureChange::Lost => "lost",
        }
    }
}

/// One feature appearing on or dropping off a SERP, dated at the snapshot
/// where the change was observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureEvent {
    pub date: NaiveDate,
    pub feature: String,
    pub change: FeatureChange,
}

/// Diff each adjacent snapshot pair in chronological order: features in the
/// later snapshot only are Gained, features in the earlier only are Lost,
/// both dated at the later snapshot. Within one date, gained events precede
/// lost events and feature names are sorted, so output is deterministic
/// despite hash-set iteration order. The list is returned
/// most-recent-first, ready for display.
pub fn feature_events(snapshots: &[FeatureSnapshot]) -> Vec<FeatureEvent> {
    let mut events = Vec::new();
    for pair in snapshots.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);

        let mut gained: Vec<&String> = next.features.difference(&prev.features).collect();
        gained.sort();
        for feature in gained {
            events.push(FeatureEvent {
                date: next.date,
                feature: feature.clone(),
                change: FeatureChange::Gained,
            });
        }

        let mut lost: Vec<&String> = prev.features.difference(&next.features).collect();
        lost.sort();
        for feature in lost {
            events.push(FeatureEvent {
                date: next.date,
                feature: feature.clone(),
                change: FeatureChange::Lost,
            });
        }
    }
    events.reverse();
    events
}
