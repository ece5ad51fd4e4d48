use super::model::{Observation, TrafficDataset};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn rows<'a>(
    dataset: &'a TrafficDataset,
    indices: &'a [usize],
) -> impl Iterator<Item = &'a Observation> + Clone {
    indices.iter().map(|&i| &dataset.observations[i])
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        sum += v;
        n += 1;
    }
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Share of rows whose live travel time exceeds the historic one, in percent.
///
/// Rows with an undefined travel ratio (zero historic travel time) are left
/// out of both numerator and denominator; with no defined ratio at all the
/// result is 0.0, never NaN.
fn congestion_pct<'a>(rows: impl Iterator<Item = &'a Observation>) -> f64 {
    let mut defined = 0usize;
    let mut congested = 0usize;
    for obs in rows {
        if let Some(ratio) = obs.travel_ratio {
            defined += 1;
            if ratio > 1.0 {
                congested += 1;
            }
        }
    }
    if defined == 0 {
        0.0
    } else {
        100.0 * congested as f64 / defined as f64
    }
}

// ---------------------------------------------------------------------------
// KpiSet – the four headline metrics
// ---------------------------------------------------------------------------

/// Scalar KPIs over the current filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSet {
    pub peak_traffic_index: f64,
    pub avg_traffic_index: f64,
    /// Mean jam delay, minutes.
    pub avg_jam_delay: f64,
    /// Summed jam delay, minutes.
    pub total_jam_delay: f64,
    /// Summed jam length, km.
    pub total_jam_length: f64,
    pub avg_jam_length: f64,
    pub congestion_pct: f64,
}

impl KpiSet {
    /// Compute all KPIs over the selected rows, each metric over the same
    /// view. Returns `None` for an empty selection – the caller shows the
    /// empty-state message instead of statistics over zero rows.
    pub fn compute(dataset: &TrafficDataset, indices: &[usize]) -> Option<KpiSet> {
        if indices.is_empty() {
            return None;
        }
        let view = rows(dataset, indices);
        let n = indices.len() as f64;

        let mut peak = f64::NEG_INFINITY;
        let mut index_sum = 0.0;
        let mut delay_sum = 0.0;
        let mut length_sum = 0.0;
        for obs in view.clone() {
            peak = peak.max(obs.traffic_index_live);
            index_sum += obs.traffic_index_live;
            delay_sum += obs.jams_delay;
            length_sum += obs.jams_length;
        }

        Some(KpiSet {
            peak_traffic_index: peak,
            avg_traffic_index: index_sum / n,
            avg_jam_delay: delay_sum / n,
            total_jam_delay: delay_sum,
            total_jam_length: length_sum,
            avg_jam_length: length_sum / n,
            congestion_pct: congestion_pct(view),
        })
    }

    /// Total jam delay converted from minutes to hours.
    pub fn total_jam_delay_hours(&self) -> f64 {
        self.total_jam_delay / 60.0
    }
}

// ---------------------------------------------------------------------------
// Grouped summaries
// ---------------------------------------------------------------------------

/// Per-hour aggregates; at most 24 rows, ordered by hour ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySummary {
    pub hour: u32,
    pub avg_jam_delay: f64,
    pub avg_traffic_index: f64,
}

/// Per-city aggregates, one row per distinct city in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct CitySummary {
    pub city: String,
    pub avg_traffic_index: f64,
    pub avg_jam_delay: f64,
    pub avg_jam_length: f64,
    pub congestion_pct: f64,
}

/// Group the selected rows by hour of day (only hours actually present).
pub fn hourly_summaries(dataset: &TrafficDataset, indices: &[usize]) -> Vec<HourlySummary> {
    // (sum_delay, sum_index, count) per hour slot.
    let mut slots = [(0.0f64, 0.0f64, 0usize); 24];
    for obs in rows(dataset, indices) {
        let slot = &mut slots[obs.hour as usize];
        slot.0 += obs.jams_delay;
        slot.1 += obs.traffic_index_live;
        slot.2 += 1;
    }
    slots
        .iter()
        .enumerate()
        .filter(|(_, (_, _, n))| *n > 0)
        .map(|(hour, &(delay, index, n))| HourlySummary {
            hour: hour as u32,
            avg_jam_delay: delay / n as f64,
            avg_traffic_index: index / n as f64,
        })
        .collect()
}

/// Group the selected rows by city, keeping the cities' first-seen order.
pub fn city_summaries(dataset: &TrafficDataset, indices: &[usize]) -> Vec<CitySummary> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for &i in indices {
        let city = &dataset.observations[i].city;
        match groups.iter_mut().find(|(name, _)| name == city) {
            Some((_, members)) => members.push(i),
            None => groups.push((city.clone(), vec![i])),
        }
    }

    groups
        .into_iter()
        .map(|(city, members)| CitySummary {
            avg_traffic_index: mean(rows(dataset, &members).map(|o| o.traffic_index_live)),
            avg_jam_delay: mean(rows(dataset, &members).map(|o| o.jams_delay)),
            avg_jam_length: mean(rows(dataset, &members).map(|o| o.jams_length)),
            congestion_pct: congestion_pct(rows(dataset, &members)),
            city,
        })
        .collect()
}

/// Hour with the highest mean live traffic index; ties resolve to the
/// smallest hour.
pub fn peak_hour(hourly: &[HourlySummary]) -> Option<u32> {
    let mut best: Option<&HourlySummary> = None;
    for summary in hourly {
        match best {
            Some(b) if summary.avg_traffic_index <= b.avg_traffic_index => {}
            _ => best = Some(summary),
        }
    }
    best.map(|s| s.hour)
}

/// City with the highest mean live traffic index; ties resolve to the first
/// city in input order.
pub fn peak_city(cities: &[CitySummary]) -> Option<&str> {
    let mut best: Option<&CitySummary> = None;
    for summary in cities {
        match best {
            Some(b) if summary.avg_traffic_index <= b.avg_traffic_index => {}
            _ => best = Some(summary),
        }
    }
    best.map(|s| s.city.as_str())
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Column order of the summary-statistics table.
pub const STAT_COLUMNS: [&str; 7] = [
    "traffic_index_live",
    "jams_count",
    "jams_delay",
    "jams_length",
    "traffic_index_week_ago",
    "travel_time_historic",
    "travel_time_live",
];

/// Descriptive statistics for one numeric column of the filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: &'static str,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n−1 denominator); 0.0 for a single row.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    fn from_values(column: &'static str, values: &[f64]) -> Self {
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count < 2 {
            0.0
        } else {
            let var =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count as f64 - 1.0);
            var.sqrt()
        };
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        ColumnStats {
            column,
            count,
            mean,
            std,
            min,
            max,
        }
    }
}

/// Per-column descriptive statistics over the selected rows, in the fixed
/// [`STAT_COLUMNS`] order. Empty for an empty selection.
pub fn column_stats(dataset: &TrafficDataset, indices: &[usize]) -> Vec<ColumnStats> {
    if indices.is_empty() {
        return Vec::new();
    }
    STAT_COLUMNS
        .iter()
        .map(|&column| {
            let values: Vec<f64> = rows(dataset, indices)
                .map(|o| match column {
                    "traffic_index_live" => o.traffic_index_live,
                    "jams_count" => o.jams_count as f64,
                    "jams_delay" => o.jams_delay,
                    "jams_length" => o.jams_length,
                    "traffic_index_week_ago" => o.traffic_index_week_ago,
                    "travel_time_historic" => o.travel_time_historic,
                    "travel_time_live" => o.travel_time_live,
                    _ => unreachable!(),
                })
                .collect();
            ColumnStats::from_values(column, &values)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::data::model::Observation;

    struct Row {
        city: &'static str,
        datetime: &'static str,
        index: f64,
        delay: f64,
        length: f64,
        live: f64,
        historic: f64,
    }

    fn build(rows: &[Row]) -> TrafficDataset {
        let observations = rows
            .iter()
            .map(|r| {
                let dt = NaiveDateTime::parse_from_str(r.datetime, "%Y-%m-%d %H:%M:%S").unwrap();
                Observation::from_raw(
                    r.city.to_string(),
                    dt,
                    r.index,
                    r.index,
                    2,
                    r.delay,
                    r.length,
                    r.live,
                    r.historic,
                )
            })
            .collect();
        TrafficDataset::from_observations(observations).unwrap()
    }

    fn everything(ds: &TrafficDataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn empty_view_skips_kpis() {
        let ds = build(&[Row {
            city: "Dubai",
            datetime: "2024-06-10 08:00:00",
            index: 50.0,
            delay: 10.0,
            length: 2.0,
            live: 20.0,
            historic: 18.0,
        }]);
        assert_eq!(KpiSet::compute(&ds, &[]), None);
        assert!(column_stats(&ds, &[]).is_empty());
        assert!(hourly_summaries(&ds, &[]).is_empty());
        assert!(city_summaries(&ds, &[]).is_empty());
    }

    #[test]
    fn kpis_over_a_small_view() {
        let ds = build(&[
            Row {
                city: "Dubai",
                datetime: "2024-06-10 08:00:00",
                index: 80.0,
                delay: 30.0,
                length: 4.0,
                live: 25.0,
                historic: 20.0,
            },
            Row {
                city: "Dubai",
                datetime: "2024-06-10 09:00:00",
                index: 40.0,
                delay: 90.0,
                length: 2.0,
                live: 15.0,
                historic: 20.0,
            },
        ]);
        let kpis = KpiSet::compute(&ds, &everything(&ds)).unwrap();
        assert_eq!(kpis.peak_traffic_index, 80.0);
        assert_eq!(kpis.avg_traffic_index, 60.0);
        assert_eq!(kpis.avg_jam_delay, 60.0);
        assert_eq!(kpis.total_jam_delay, 120.0);
        assert_eq!(kpis.total_jam_delay_hours(), 2.0);
        assert_eq!(kpis.total_jam_length, 6.0);
        assert_eq!(kpis.avg_jam_length, 3.0);
        assert_eq!(kpis.congestion_pct, 50.0);
        assert!(kpis.peak_traffic_index >= kpis.avg_traffic_index);
    }

    #[test]
    fn congestion_excludes_undefined_ratios() {
        // historic 0, 10, 10 against live 5, 5, 20: the first row has no
        // defined ratio, of the remaining two exactly one exceeds 1.
        let ds = build(&[
            Row {
                city: "Dubai",
                datetime: "2024-06-10 08:00:00",
                index: 50.0,
                delay: 1.0,
                length: 1.0,
                live: 5.0,
                historic: 0.0,
            },
            Row {
                city: "Dubai",
                datetime: "2024-06-10 09:00:00",
                index: 50.0,
                delay: 1.0,
                length: 1.0,
                live: 5.0,
                historic: 10.0,
            },
            Row {
                city: "Dubai",
                datetime: "2024-06-10 10:00:00",
                index: 50.0,
                delay: 1.0,
                length: 1.0,
                live: 20.0,
                historic: 10.0,
            },
        ]);
        let kpis = KpiSet::compute(&ds, &everything(&ds)).unwrap();
        assert_eq!(kpis.congestion_pct, 50.0);
    }

    #[test]
    fn congestion_is_zero_without_defined_ratios() {
        let ds = build(&[Row {
            city: "Dubai",
            datetime: "2024-06-10 08:00:00",
            index: 50.0,
            delay: 1.0,
            length: 1.0,
            live: 5.0,
            historic: 0.0,
        }]);
        let kpis = KpiSet::compute(&ds, &everything(&ds)).unwrap();
        assert_eq!(kpis.congestion_pct, 0.0);
    }

    #[test]
    fn hourly_summaries_are_sorted_and_bounded() {
        let ds = build(&[
            Row {
                city: "Dubai",
                datetime: "2024-06-10 17:00:00",
                index: 70.0,
                delay: 20.0,
                length: 1.0,
                live: 10.0,
                historic: 10.0,
            },
            Row {
                city: "Dubai",
                datetime: "2024-06-11 08:00:00",
                index: 60.0,
                delay: 10.0,
                length: 1.0,
                live: 10.0,
                historic: 10.0,
            },
            Row {
                city: "Dubai",
                datetime: "2024-06-10 08:00:00",
                index: 40.0,
                delay: 30.0,
                length: 1.0,
                live: 10.0,
                historic: 10.0,
            },
        ]);
        let hourly = hourly_summaries(&ds, &everything(&ds));
        assert!(hourly.len() <= 24);
        assert_eq!(
            hourly.iter().map(|h| h.hour).collect::<Vec<_>>(),
            vec![8, 17]
        );
        assert_eq!(hourly[0].avg_jam_delay, 20.0);
        assert_eq!(hourly[0].avg_traffic_index, 50.0);
        assert_eq!(hourly[1].avg_jam_delay, 20.0);
    }

    #[test]
    fn city_summaries_keep_first_seen_order() {
        let ds = build(&[
            Row {
                city: "Riyadh",
                datetime: "2024-06-10 08:00:00",
                index: 30.0,
                delay: 5.0,
                length: 1.0,
                live: 12.0,
                historic: 10.0,
            },
            Row {
                city: "Dubai",
                datetime: "2024-06-10 08:00:00",
                index: 80.0,
                delay: 25.0,
                length: 3.0,
                live: 9.0,
                historic: 10.0,
            },
            Row {
                city: "Riyadh",
                datetime: "2024-06-10 09:00:00",
                index: 50.0,
                delay: 15.0,
                length: 3.0,
                live: 8.0,
                historic: 10.0,
            },
        ]);
        let cities = city_summaries(&ds, &everything(&ds));
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].city, "Riyadh");
        assert_eq!(cities[0].avg_traffic_index, 40.0);
        assert_eq!(cities[0].avg_jam_delay, 10.0);
        assert_eq!(cities[0].avg_jam_length, 2.0);
        assert_eq!(cities[0].congestion_pct, 50.0);
        assert_eq!(cities[1].city, "Dubai");
        assert_eq!(cities[1].congestion_pct, 0.0);
    }

    #[test]
    fn peaks_break_ties_towards_the_front() {
        let hourly = vec![
            HourlySummary {
                hour: 7,
                avg_jam_delay: 1.0,
                avg_traffic_index: 60.0,
            },
            HourlySummary {
                hour: 9,
                avg_jam_delay: 1.0,
                avg_traffic_index: 60.0,
            },
        ];
        assert_eq!(peak_hour(&hourly), Some(7));

        let cities = vec![
            CitySummary {
                city: "Doha".to_string(),
                avg_traffic_index: 55.0,
                avg_jam_delay: 0.0,
                avg_jam_length: 0.0,
                congestion_pct: 0.0,
            },
            CitySummary {
                city: "Dubai".to_string(),
                avg_traffic_index: 55.0,
                avg_jam_delay: 0.0,
                avg_jam_length: 0.0,
                congestion_pct: 0.0,
            },
        ];
        assert_eq!(peak_city(&cities), Some("Doha"));
        assert_eq!(peak_hour(&[]), None);
        assert_eq!(peak_city(&[]), None);
    }

    #[test]
    fn column_stats_match_pandas_describe() {
        let ds = build(&[
            Row {
                city: "Dubai",
                datetime: "2024-06-10 08:00:00",
                index: 40.0,
                delay: 10.0,
                length: 1.0,
                live: 10.0,
                historic: 10.0,
            },
            Row {
                city: "Dubai",
                datetime: "2024-06-10 09:00:00",
                index: 60.0,
                delay: 30.0,
                length: 3.0,
                live: 10.0,
                historic: 10.0,
            },
        ]);
        let stats = column_stats(&ds, &everything(&ds));
        assert_eq!(stats.len(), STAT_COLUMNS.len());

        let live = &stats[0];
        assert_eq!(live.column, "traffic_index_live");
        assert_eq!(live.count, 2);
        assert_eq!(live.mean, 50.0);
        assert_eq!(live.min, 40.0);
        assert_eq!(live.max, 60.0);
        // Sample std of {40, 60} is sqrt(200).
        assert!((live.std - 200.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_row_has_zero_std() {
        let ds = build(&[Row {
            city: "Dubai",
            datetime: "2024-06-10 08:00:00",
            index: 40.0,
            delay: 10.0,
            length: 1.0,
            live: 10.0,
            historic: 10.0,
        }]);
        let stats = column_stats(&ds, &everything(&ds));
        assert!(stats.iter().all(|s| s.std == 0.0));
    }
}
