use eframe::egui::{self, Ui};

use crate::state::{AppState, Tab, ViewMode};
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TrafficApp {
    pub state: AppState,
}

impl TrafficApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for TrafficApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and row-count caption ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, tabs, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.state);
        });
    }
}

// ---------------------------------------------------------------------------
// Central panel layout
// ---------------------------------------------------------------------------

fn central_panel(ui: &mut Ui, state: &mut AppState) {
    // Empty selection short-circuits everything downstream: no KPIs, no
    // tables, no charts.
    if state.kpis.is_none() {
        panels::empty_state(ui);
        return;
    }

    panels::kpi_row(ui, state);
    ui.separator();

    match state.view_mode {
        ViewMode::Compact => {
            plot::traffic_over_time(ui, state);
        }
        ViewMode::Full => {
            ui.horizontal(|ui: &mut Ui| {
                for tab in Tab::ALL {
                    if ui
                        .selectable_label(state.active_tab == tab, tab.label())
                        .clicked()
                    {
                        state.active_tab = tab;
                    }
                }
            });
            ui.separator();

            match state.active_tab {
                Tab::Preview => tables::preview_tab(ui, state),
                Tab::Summary => tables::summary_tab(ui, state),
                Tab::Charts => {
                    tables::section_heading(ui, "Traffic Over Time");
                    plot::traffic_over_time(ui, state);
                    tables::section_heading(ui, "Average Jam Delay by Hour");
                    plot::jam_delay_by_hour(ui, state);
                }
            }
        }
    }
}
