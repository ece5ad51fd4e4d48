use eframe::egui::{self, RichText, ScrollArea, Slider, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::DayType;
use crate::state::{AppState, ViewMode};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dataset description");
    ui.label(
        "Real-time and historical traffic information: traffic indexes, jam \
         counts, delays (minutes), and jam lengths (kilometres) collected \
         across major cities in the region.",
    );
    ui.add_space(4.0);

    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the loop.
    let cities = state.dataset.cities.clone();
    let date_span = (state.dataset.date_min, state.dataset.date_max);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- City multi-select ----
            let n_selected = state.criteria.cities.len();
            let header_text = format!("Cities  ({n_selected}/{})", cities.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("cities")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_cities();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_cities();
                        }
                    });

                    for city in &cities {
                        let text = RichText::new(city).color(state.colors.color_for(city));
                        let mut checked = state.criteria.cities.contains(city);
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_city(city);
                        }
                    }
                });
            ui.separator();

            // ---- Date range ----
            ui.strong("Date range");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("From");
                ui.add(
                    DatePickerButton::new(&mut state.criteria.date_min).id_salt("date_min"),
                );
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("To");
                ui.add(
                    DatePickerButton::new(&mut state.criteria.date_max).id_salt("date_max"),
                );
            });
            ui.small(format!(
                "Dataset spans {} – {}",
                date_span.0.format("%Y-%m-%d"),
                date_span.1.format("%Y-%m-%d")
            ));
            ui.separator();

            // ---- Hour of day ----
            ui.strong("Hour of day");
            ui.add(Slider::new(&mut state.criteria.hour_lo, 0..=23).text("from"));
            ui.add(Slider::new(&mut state.criteria.hour_hi, 0..=23).text("to"));
            ui.separator();

            // ---- Day type ----
            ui.strong("Day type");
            egui::ComboBox::from_id_salt("day_type")
                .selected_text(state.criteria.day_type.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for day_type in DayType::ALL {
                        ui.selectable_value(
                            &mut state.criteria.day_type,
                            day_type,
                            day_type.to_string(),
                        );
                    }
                });
        });

    // Recompute the view and every aggregate after any widget change.
    state.refilter();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: title, row-count caption, layout toggle.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Traffic Insights Dashboard");
        ui.separator();

        ui.label(format!(
            "Showing data for {} of {} observations",
            state.visible_indices.len(),
            state.dataset.len()
        ));

        ui.separator();

        let compact = state.view_mode == ViewMode::Compact;
        if ui.selectable_label(compact, "Compact Layout").clicked() {
            state.view_mode = if compact {
                ViewMode::Full
            } else {
                ViewMode::Compact
            };
        }
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Render the four headline metrics with their secondary annotations.
/// Only called with a non-empty selection.
pub fn kpi_row(ui: &mut Ui, state: &AppState) {
    let Some(kpis) = &state.kpis else {
        return;
    };

    ui.columns(4, |cols: &mut [Ui]| {
        metric(
            &mut cols[0],
            "Peak Traffic Index",
            format!("{:.0}", kpis.peak_traffic_index),
            format!("Average: {:.1}", kpis.avg_traffic_index),
        );
        metric(
            &mut cols[1],
            "Average Jam Delay (Min)",
            format!("{:.1}", kpis.avg_jam_delay),
            format!("Total Delay: {:.1} hours", kpis.total_jam_delay_hours()),
        );
        metric(
            &mut cols[2],
            "Total Jam Length (km)",
            format!("{:.0}", kpis.total_jam_length),
            format!("Average: {:.2} km", kpis.avg_jam_length),
        );
        metric(
            &mut cols[3],
            "Time in Congestion (%)",
            format!("{:.0}%", kpis.congestion_pct),
            String::new(),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String, annotation: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.small(label);
        ui.heading(RichText::new(value).size(28.0));
        if !annotation.is_empty() {
            ui.weak(annotation);
        }
    });
}

// ---------------------------------------------------------------------------
// Empty state
// ---------------------------------------------------------------------------

/// Shown instead of KPIs, tables, and charts when the filters select no rows.
pub fn empty_state(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("No data available for the selected filters. Please adjust filters.");
    });
}
