use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    /// Build the app and load the configured dataset. A failed load leaves
    /// an empty dashboard with the error in the status bar.
    pub fn new(config: DashboardConfig) -> Self {
        let path = config.dataset_path.clone();
        let mut state = AppState::new(config);
        if state.load_path(&path).is_err() {
            log::warn!("Starting without data; use File → Open… to load a dataset");
        }
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: the dashboard page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::page_title(ui);
                    ui.add_space(8.0);

                    panels::site_dropdown(ui, &mut self.state);
                    ui.add_space(8.0);

                    plot::pie_chart(ui, self.state.pie());
                    ui.add_space(8.0);

                    panels::payload_controls(ui, &mut self.state);
                    ui.add_space(8.0);

                    plot::scatter_chart(ui, self.state.scatter());

                    egui::CollapsingHeader::new("Records")
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            table::records_table(ui, &self.state.visible_records());
                        });
                });
        });
    }
}
