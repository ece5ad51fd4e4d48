use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{DayType, Observation, TrafficDataset};

// ---------------------------------------------------------------------------
// FilterCriteria – the user's current selection
// ---------------------------------------------------------------------------

/// Value object rebuilt from the widgets on every interaction; never persisted.
///
/// All bounds are inclusive. The date predicate compares calendar dates only,
/// ignoring the time of day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub cities: BTreeSet<String>,
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub hour_lo: u32,
    pub hour_hi: u32,
    pub day_type: DayType,
}

impl FilterCriteria {
    /// Default selection when the dashboard opens: the first two cities, the
    /// full date span, and the 6–20 commuting window.
    pub fn initial(dataset: &TrafficDataset) -> Self {
        FilterCriteria {
            cities: dataset.cities.iter().take(2).cloned().collect(),
            date_min: dataset.date_min,
            date_max: dataset.date_max,
            hour_lo: 6,
            hour_hi: 20,
            day_type: DayType::All,
        }
    }

    /// Whether a single observation passes all four predicate groups.
    pub fn matches(&self, obs: &Observation) -> bool {
        self.cities.contains(&obs.city)
            && (self.date_min..=self.date_max).contains(&obs.date())
            && (self.hour_lo..=self.hour_hi).contains(&obs.hour)
            && self.day_type.matches(obs.is_weekend)
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of observations passing the current criteria, in dataset
/// order. An empty result is a valid outcome, not an error; callers must
/// short-circuit aggregation on it and show the empty-state message instead.
pub fn filtered_indices(dataset: &TrafficDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .observations
        .iter()
        .enumerate()
        .filter(|(_, obs)| criteria.matches(obs))
        .map(|(i, _)| i)
        .collect()
}
