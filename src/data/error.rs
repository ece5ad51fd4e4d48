use thiserror::Error;

/// Failures while loading the dataset.
///
/// Every variant is fatal: the dashboard refuses to start without a complete,
/// well-formed table. There is no partial-load or recovery mode.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("reading dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("dataset is missing required column '{name}'")]
    MissingColumn { name: String },

    #[error("row {row}: unparseable timestamp '{value}'")]
    Timestamp { row: usize, value: String },

    #[error("dataset contains no rows")]
    EmptyDataset,
}
