use crate::color::CityColorMap;
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::model::TrafficDataset;
use crate::data::summary::{
    city_summaries, column_stats, hourly_summaries, CitySummary, ColumnStats, HourlySummary,
    KpiSet,
};

/// How many filtered rows the data-preview table shows at most.
pub const PREVIEW_ROWS: usize = 100;

// ---------------------------------------------------------------------------
// Presentation configuration
// ---------------------------------------------------------------------------

/// Which dashboard layout to render. Both modes share the same filter and
/// aggregation pipeline; `Compact` only drops the tabbed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// KPI row plus the Data Preview / Summary Statistics / Visual Insights tabs.
    #[default]
    Full,
    /// KPI row plus the time-series chart only.
    Compact,
}

/// Tabs of the full layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Preview,
    Summary,
    Charts,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Preview, Tab::Summary, Tab::Charts];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Preview => "Data Preview",
            Tab::Summary => "Summary Statistics",
            Tab::Charts => "Visual Insights",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded exactly once before the UI starts and never replaced;
/// everything under "derived" is recomputed from scratch by [`AppState::refilter`]
/// after each widget change.
pub struct AppState {
    pub dataset: TrafficDataset,
    pub criteria: FilterCriteria,
    pub view_mode: ViewMode,
    pub active_tab: Tab,
    pub colors: CityColorMap,

    // -- derived from (dataset, criteria) --
    /// Indices of observations passing the current filters, in dataset order.
    pub visible_indices: Vec<usize>,
    /// `None` when the selection is empty; the UI then shows the empty-state
    /// message and skips every table and chart.
    pub kpis: Option<KpiSet>,
    pub hourly: Vec<HourlySummary>,
    pub city_rows: Vec<CitySummary>,
    pub stats: Vec<ColumnStats>,
    /// First [`PREVIEW_ROWS`] visible rows, ordered by datetime.
    pub preview_indices: Vec<usize>,
}

impl AppState {
    pub fn new(dataset: TrafficDataset, view_mode: ViewMode) -> Self {
        let criteria = FilterCriteria::initial(&dataset);
        let colors = CityColorMap::new(&dataset.cities);
        let mut state = AppState {
            dataset,
            criteria,
            view_mode,
            active_tab: Tab::default(),
            colors,
            visible_indices: Vec::new(),
            kpis: None,
            hourly: Vec::new(),
            city_rows: Vec::new(),
            stats: Vec::new(),
            preview_indices: Vec::new(),
        };
        state.refilter();
        state
    }

    /// Recompute the filtered view and every aggregate after a filter change.
    /// One synchronous pass over the full dataset; nothing incremental.
    pub fn refilter(&mut self) {
        self.normalize_criteria();
        self.visible_indices = filtered_indices(&self.dataset, &self.criteria);

        self.kpis = KpiSet::compute(&self.dataset, &self.visible_indices);
        if self.kpis.is_none() {
            // Empty selection: suppress all downstream aggregation.
            self.hourly.clear();
            self.city_rows.clear();
            self.stats.clear();
            self.preview_indices.clear();
            return;
        }

        self.hourly = hourly_summaries(&self.dataset, &self.visible_indices);
        self.city_rows = city_summaries(&self.dataset, &self.visible_indices);
        self.stats = column_stats(&self.dataset, &self.visible_indices);

        let mut preview = self.visible_indices.clone();
        preview.sort_by_key(|&i| self.dataset.observations[i].datetime);
        preview.truncate(PREVIEW_ROWS);
        self.preview_indices = preview;
    }

    /// Keep widget-edited bounds ordered and inside the dataset's span.
    fn normalize_criteria(&mut self) {
        let c = &mut self.criteria;
        c.hour_lo = c.hour_lo.min(23);
        c.hour_hi = c.hour_hi.min(23);
        if c.hour_lo > c.hour_hi {
            std::mem::swap(&mut c.hour_lo, &mut c.hour_hi);
        }
        c.date_min = c.date_min.clamp(self.dataset.date_min, self.dataset.date_max);
        c.date_max = c.date_max.clamp(self.dataset.date_min, self.dataset.date_max);
        if c.date_min > c.date_max {
            std::mem::swap(&mut c.date_min, &mut c.date_max);
        }
    }

    /// Toggle a single city in the filter.
    pub fn toggle_city(&mut self, city: &str) {
        if !self.criteria.cities.remove(city) {
            self.criteria.cities.insert(city.to_string());
        }
        self.refilter();
    }

    /// Select every city.
    pub fn select_all_cities(&mut self) {
        self.criteria.cities = self.dataset.cities.iter().cloned().collect();
        self.refilter();
    }

    /// Deselect every city (yields the empty-state view).
    pub fn select_no_cities(&mut self) {
        self.criteria.cities.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::data::model::Observation;

    fn dataset() -> TrafficDataset {
        let mut observations = Vec::new();
        for day in 1..=5 {
            for hour in [7, 12, 18] {
                let dt = NaiveDateTime::parse_from_str(
                    &format!("2024-06-{day:02} {hour:02}:00:00"),
                    "%Y-%m-%d %H:%M:%S",
                )
                .unwrap();
                for city in ["Dubai", "Riyadh", "Doha"] {
                    observations.push(Observation::from_raw(
                        city.to_string(),
                        dt,
                        50.0 + hour as f64,
                        48.0,
                        2,
                        8.0,
                        1.5,
                        20.0,
                        18.0,
                    ));
                }
            }
        }
        TrafficDataset::from_observations(observations).unwrap()
    }

    #[test]
    fn initial_state_has_aggregates() {
        let state = AppState::new(dataset(), ViewMode::Full);
        assert!(!state.visible_indices.is_empty());
        assert!(state.kpis.is_some());
        assert!(!state.hourly.is_empty());
        // Initial criteria select the first two cities only.
        assert_eq!(state.city_rows.len(), 2);
        assert_eq!(state.stats.len(), 7);
    }

    #[test]
    fn empty_selection_suppresses_all_aggregates() {
        let mut state = AppState::new(dataset(), ViewMode::Full);
        state.select_no_cities();
        assert!(state.visible_indices.is_empty());
        assert!(state.kpis.is_none());
        assert!(state.hourly.is_empty());
        assert!(state.city_rows.is_empty());
        assert!(state.stats.is_empty());
        assert!(state.preview_indices.is_empty());
    }

    #[test]
    fn toggling_a_city_round_trips() {
        let mut state = AppState::new(dataset(), ViewMode::Full);
        let before = state.visible_indices.clone();
        state.toggle_city("Doha");
        assert_ne!(state.visible_indices, before);
        state.toggle_city("Doha");
        assert_eq!(state.visible_indices, before);
    }

    #[test]
    fn preview_is_sorted_and_capped() {
        let mut state = AppState::new(dataset(), ViewMode::Full);
        state.select_all_cities();
        assert!(state.preview_indices.len() <= PREVIEW_ROWS);
        let times: Vec<_> = state
            .preview_indices
            .iter()
            .map(|&i| state.dataset.observations[i].datetime)
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn inverted_hour_bounds_are_normalized() {
        let mut state = AppState::new(dataset(), ViewMode::Full);
        state.criteria.hour_lo = 18;
        state.criteria.hour_hi = 7;
        state.refilter();
        assert!(state.criteria.hour_lo <= state.criteria.hour_hi);
        assert!(state.kpis.is_some());
    }
}
