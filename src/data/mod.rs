/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TrafficDataset (derived columns computed once)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ TrafficDataset │  Vec<Observation>, city + date indices
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterCriteria → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  KPIs, per-hour / per-city aggregates, column stats
///   └──────────┘
/// ```
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
