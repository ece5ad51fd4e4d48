use chrono::DateTime;
use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Time-series line chart: live traffic index per city
// ---------------------------------------------------------------------------

/// Render the live traffic index over time, one line per selected city.
pub fn traffic_over_time(ui: &mut Ui, state: &AppState) {
    // Per-city (epoch seconds, index) series in datetime order. The cities'
    // first-seen order matches the city summary table.
    let mut series: Vec<(&str, Vec<[f64; 2]>)> = Vec::new();
    for &i in &state.visible_indices {
        let obs = &state.dataset.observations[i];
        let point = [obs.datetime.and_utc().timestamp() as f64, obs.traffic_index_live];
        match series.iter_mut().find(|(city, _)| *city == obs.city) {
            Some((_, points)) => points.push(point),
            None => series.push((obs.city.as_str(), vec![point])),
        }
    }
    for (_, points) in &mut series {
        points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    }

    Plot::new("traffic_over_time")
        .legend(Legend::default())
        .height(450.0)
        .x_axis_label("Time")
        .y_axis_label("Live Traffic Index")
        .x_axis_formatter(format_timestamp_mark)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (city, points) in series {
                let line = Line::new(PlotPoints::from(points))
                    .name(city)
                    .color(state.colors.color_for(city))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

fn format_timestamp_mark(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    DateTime::from_timestamp(mark.value as i64, 0)
        .map(|dt| dt.format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Bar chart: average jam delay by hour
// ---------------------------------------------------------------------------

/// Render the mean jam delay per hour of day from the hourly summaries.
pub fn jam_delay_by_hour(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .hourly
        .iter()
        .map(|h| Bar::new(h.hour as f64, h.avg_jam_delay).width(0.7))
        .collect();

    Plot::new("jam_delay_by_hour")
        .legend(Legend::default())
        .height(350.0)
        .x_axis_label("Hour of Day")
        .y_axis_label("Average Jam Delay (minutes)")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Avg jam delay"));
        });
}
