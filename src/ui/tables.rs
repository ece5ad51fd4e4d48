use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::summary::{peak_city, peak_hour};
use crate::state::{AppState, PREVIEW_ROWS};

// ---------------------------------------------------------------------------
// Data preview – first rows of the filtered view, ordered by datetime
// ---------------------------------------------------------------------------

/// Render the sample of filtered data plus the key-insight lines.
pub fn preview_tab(ui: &mut Ui, state: &AppState) {
    ui.label(format!(
        "Sample of filtered data (first {PREVIEW_ROWS} rows by time)"
    ));
    ui.add_space(4.0);

    ScrollArea::both()
        .id_salt("preview_scroll")
        .max_height(ui.available_height() * 0.7)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("preview_grid")
                .striped(true)
                .min_col_width(60.0)
                .show(ui, |ui: &mut Ui| {
                    for header in [
                        "City",
                        "Datetime",
                        "Hour",
                        "Day",
                        "Index (live)",
                        "Index (wk ago)",
                        "Jams",
                        "Delay (min)",
                        "Length (km)",
                        "Travel (live)",
                        "Travel (hist)",
                        "Ratio",
                    ] {
                        ui.strong(header);
                    }
                    ui.end_row();

                    for &i in &state.preview_indices {
                        let obs = &state.dataset.observations[i];
                        ui.colored_label(state.colors.color_for(&obs.city), &obs.city);
                        ui.label(obs.datetime.format("%Y-%m-%d %H:%M").to_string());
                        ui.label(obs.hour.to_string());
                        ui.label(obs.day_of_week.to_string());
                        ui.label(format!("{:.1}", obs.traffic_index_live));
                        ui.label(format!("{:.1}", obs.traffic_index_week_ago));
                        ui.label(obs.jams_count.to_string());
                        ui.label(format!("{:.1}", obs.jams_delay));
                        ui.label(format!("{:.2}", obs.jams_length));
                        ui.label(format!("{:.1}", obs.travel_time_live));
                        ui.label(format!("{:.1}", obs.travel_time_historic));
                        match obs.travel_ratio {
                            Some(ratio) => ui.label(format!("{ratio:.2}")),
                            None => ui.weak("–"),
                        };
                        ui.end_row();
                    }
                });
        });

    ui.separator();
    key_insights(ui, state);
}

/// The insight lines under the preview: busiest city, busiest hour,
/// congestion share.
fn key_insights(ui: &mut Ui, state: &AppState) {
    ui.heading("Key Insights");
    let Some(kpis) = &state.kpis else {
        return;
    };

    if let Some(city) = peak_city(&state.city_rows) {
        ui.label(format!(
            "• Highest average traffic index among the selected cities is in {city}."
        ));
    }
    if let Some(hour) = peak_hour(&state.hourly) {
        ui.label(format!("• Traffic peaks around {hour:02}:00."));
    }
    ui.label(format!(
        "• Congestion happens approximately {:.0}% of the time in the filtered data.",
        kpis.congestion_pct
    ));
}

// ---------------------------------------------------------------------------
// Summary statistics – describe() table and per-city aggregates
// ---------------------------------------------------------------------------

/// Render the descriptive-statistics and per-city summary tables.
pub fn summary_tab(ui: &mut Ui, state: &AppState) {
    ui.label("Summary statistics (filtered data)");
    ui.add_space(4.0);

    egui::Grid::new("stats_grid")
        .striped(true)
        .min_col_width(70.0)
        .show(ui, |ui: &mut Ui| {
            for header in ["Column", "Count", "Mean", "Std", "Min", "Max"] {
                ui.strong(header);
            }
            ui.end_row();

            for stats in &state.stats {
                ui.label(stats.column);
                ui.label(stats.count.to_string());
                ui.label(format!("{:.2}", stats.mean));
                ui.label(format!("{:.2}", stats.std));
                ui.label(format!("{:.2}", stats.min));
                ui.label(format!("{:.2}", stats.max));
                ui.end_row();
            }
        });

    ui.separator();
    ui.label("Average metrics by city");
    ui.add_space(4.0);

    egui::Grid::new("city_grid")
        .striped(true)
        .min_col_width(90.0)
        .show(ui, |ui: &mut Ui| {
            for header in [
                "City",
                "Avg Traffic Index",
                "Avg Jam Delay (min)",
                "Avg Jam Length (km)",
                "Congestion Percentage (%)",
            ] {
                ui.strong(header);
            }
            ui.end_row();

            for row in &state.city_rows {
                ui.colored_label(state.colors.color_for(&row.city), &row.city);
                ui.label(format!("{:.2}", row.avg_traffic_index));
                ui.label(format!("{:.2}", row.avg_jam_delay));
                ui.label(format!("{:.2}", row.avg_jam_length));
                ui.label(format!("{:.2}", row.congestion_pct));
                ui.end_row();
            }
        });
}

/// Small heading helper shared by the chart tab.
pub fn section_heading(ui: &mut Ui, text: &str) {
    ui.add_space(6.0);
    ui.label(RichText::new(text).strong());
}
