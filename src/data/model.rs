use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

// ---------------------------------------------------------------------------
// Observation – one row of the dataset
// ---------------------------------------------------------------------------

/// A single traffic measurement (one row of the source table).
///
/// `hour`, `day_of_week`, `is_weekend` and `travel_ratio` are derived from the
/// raw columns at load time and never recomputed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub city: String,
    /// Source of truth for all time-based filtering.
    pub datetime: NaiveDateTime,
    /// Hour of day, 0–23.
    pub hour: u32,
    pub day_of_week: Weekday,
    pub is_weekend: bool,
    pub traffic_index_live: f64,
    pub traffic_index_week_ago: f64,
    pub jams_count: u32,
    /// Total delay caused by jams, in minutes.
    pub jams_delay: f64,
    /// Total jam length, in kilometres.
    pub jams_length: f64,
    pub travel_time_live: f64,
    pub travel_time_historic: f64,
    /// Live over historic travel time. `None` when the historic time is zero,
    /// so a bad row can never poison downstream ratios with NaN or infinity.
    pub travel_ratio: Option<f64>,
}

impl Observation {
    /// Build an observation from the raw columns, computing the derived fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        city: String,
        datetime: NaiveDateTime,
        traffic_index_live: f64,
        traffic_index_week_ago: f64,
        jams_count: u32,
        jams_delay: f64,
        jams_length: f64,
        travel_time_live: f64,
        travel_time_historic: f64,
    ) -> Self {
        let day_of_week = datetime.weekday();
        let travel_ratio = if travel_time_historic == 0.0 {
            None
        } else {
            Some(travel_time_live / travel_time_historic)
        };
        Observation {
            city,
            hour: datetime.time().hour(),
            day_of_week,
            is_weekend: matches!(day_of_week, Weekday::Sat | Weekday::Sun),
            datetime,
            traffic_index_live,
            traffic_index_week_ago,
            jams_count,
            jams_delay,
            jams_length,
            travel_time_live,
            travel_time_historic,
            travel_ratio,
        }
    }

    /// Calendar date of the measurement (time of day dropped).
    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }
}

// ---------------------------------------------------------------------------
// TrafficDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices.
///
/// Created once at startup and immutable for the process lifetime; every
/// filter interaction re-derives its view from this table.
#[derive(Debug, Clone)]
pub struct TrafficDataset {
    /// All observations, in file row order.
    pub observations: Vec<Observation>,
    /// Sorted unique city names.
    pub cities: Vec<String>,
    /// Earliest calendar date in the dataset.
    pub date_min: NaiveDate,
    /// Latest calendar date in the dataset.
    pub date_max: NaiveDate,
}

impl TrafficDataset {
    /// Build the city and date indices from the loaded rows.
    ///
    /// Returns `None` for an empty row set – the dashboard has no meaningful
    /// state without at least one observation.
    pub fn from_observations(observations: Vec<Observation>) -> Option<Self> {
        let first = observations.first()?;
        let mut date_min = first.date();
        let mut date_max = first.date();
        let mut cities: Vec<String> = Vec::new();

        for obs in &observations {
            let d = obs.date();
            date_min = date_min.min(d);
            date_max = date_max.max(d);
            if !cities.contains(&obs.city) {
                cities.push(obs.city.clone());
            }
        }
        cities.sort();

        Some(TrafficDataset {
            observations,
            cities,
            date_min,
            date_max,
        })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DayType – weekday/weekend filter mode
// ---------------------------------------------------------------------------

/// Day-type filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayType {
    #[default]
    All,
    WeekdaysOnly,
    WeekendsOnly,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::All, DayType::WeekdaysOnly, DayType::WeekendsOnly];

    /// Whether an observation with the given weekend flag passes this mode.
    pub fn matches(self, is_weekend: bool) -> bool {
        match self {
            DayType::All => true,
            DayType::WeekdaysOnly => !is_weekend,
            DayType::WeekendsOnly => is_weekend,
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DayType::All => "All Days",
            DayType::WeekdaysOnly => "Weekdays Only",
            DayType::WeekendsOnly => "Weekends Only",
        };
        write!(f, "{label}")
    }
}
