use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{BoosterCategory, LaunchRecord, REQUIRED_COLUMNS};

const ROW_HEIGHT: f32 = 18.0;

/// Table of the records currently plotted in the scatter chart.
pub fn records_table(ui: &mut Ui, records: &[&LaunchRecord]) {
    if records.is_empty() {
        ui.label("No records match the current selection.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(260.0)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for title in REQUIRED_COLUMNS.into_iter().chain(["Category"]) {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, records.len(), |mut row| {
                let rec = records[row.index()];
                row.col(|ui| {
                    ui.label(rec.launch_site.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", rec.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(rec.booster_version.as_str());
                });
                row.col(|ui| {
                    ui.label(u8::from(rec.class).to_string());
                });
                row.col(|ui| {
                    ui.label(BoosterCategory::classify(&rec.booster_version).label());
                });
            });
        });
}
