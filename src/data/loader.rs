use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::error::DataError;
use super::model::{Observation, TrafficDataset};

/// Columns the dataset must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "city",
    "datetime",
    "traffic_index_live",
    "traffic_index_week_ago",
    "jams_count",
    "jams_delay",
    "jams_length",
    "travel_time_live",
    "travel_time_historic",
];

/// Timestamp formats accepted for the `datetime` column.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a traffic dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row followed by one observation per line
/// * `.json` – records-oriented array, `[{ "city": ..., "datetime": ..., ... }]`
pub fn load_file(path: &Path) -> Result<TrafficDataset, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(std::fs::File::open(path)?),
        "json" => load_json(std::fs::File::open(path)?),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Raw record – shared by the CSV and JSON decoders
// ---------------------------------------------------------------------------

/// One undecorated source row; `datetime` stays a string until validated.
#[derive(Debug, Deserialize)]
struct RawRecord {
    city: String,
    datetime: String,
    traffic_index_live: f64,
    traffic_index_week_ago: f64,
    jams_count: u32,
    jams_delay: f64,
    jams_length: f64,
    travel_time_live: f64,
    travel_time_historic: f64,
}

impl RawRecord {
    /// Validate the timestamp and derive the calendar fields.
    fn into_observation(self, row: usize) -> Result<Observation, DataError> {
        let datetime = parse_datetime(&self.datetime).ok_or_else(|| DataError::Timestamp {
            row,
            value: self.datetime.clone(),
        })?;
        Ok(Observation::from_raw(
            self.city,
            datetime,
            self.traffic_index_live,
            self.traffic_index_week_ago,
            self.jams_count,
            self.jams_delay,
            self.jams_length,
            self.travel_time_live,
            self.travel_time_historic,
        ))
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse a CSV dataset from any reader (file in production, strings in tests).
pub fn load_csv<R: Read>(input: R) -> Result<TrafficDataset, DataError> {
    let mut reader = csv::Reader::from_reader(input);

    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DataError::MissingColumn {
                name: required.to_string(),
            });
        }
    }

    let mut observations = Vec::new();
    for (row, result) in reader.deserialize::<RawRecord>().enumerate() {
        observations.push(result?.into_observation(row)?);
    }

    TrafficDataset::from_observations(observations).ok_or(DataError::EmptyDataset)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON dataset (the default
/// `df.to_json(orient='records')` layout).
pub fn load_json<R: Read>(input: R) -> Result<TrafficDataset, DataError> {
    let records: Vec<RawRecord> = serde_json::from_reader(input)?;

    let mut observations = Vec::with_capacity(records.len());
    for (row, record) in records.into_iter().enumerate() {
        observations.push(record.into_observation(row)?);
    }

    TrafficDataset::from_observations(observations).ok_or(DataError::EmptyDataset)
}
