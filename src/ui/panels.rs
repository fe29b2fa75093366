use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::SiteSelection;
use crate::figures::ColorBy;
use crate::state::AppState;
use crate::ui::range_slider::RangeSlider;

const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);
const SITE_PLACEHOLDER: &str = "Select a Launch Site here";

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export figures…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let source = state
                .dataset_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{} launch records {source} ({} sites, {} booster versions), {} in scatter",
                ds.len(),
                ds.sites.len(),
                ds.booster_versions.len(),
                state.scatter().point_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Page sections
// ---------------------------------------------------------------------------

pub fn page_title(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(40.0)
                .color(TITLE_COLOR),
        );
    });
}

/// Searchable launch-site dropdown.
pub fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    let options = state.config.site_options.clone();
    let current = state.site().clone();
    let selected_text = options
        .iter()
        .find(|o| o.value == current.value())
        .map(|o| o.label.clone())
        .unwrap_or_else(|| current.value().to_string());

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(if selected_text.is_empty() {
            SITE_PLACEHOLDER.to_string()
        } else {
            selected_text
        })
        .width(ui.available_width().min(480.0))
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_query)
                    .hint_text(SITE_PLACEHOLDER),
            );
            let query = state.site_query.to_lowercase();
            for opt in options
                .iter()
                .filter(|o| query.is_empty() || o.label.to_lowercase().contains(&query))
            {
                if ui
                    .selectable_label(current.value() == opt.value, opt.label.as_str())
                    .clicked()
                {
                    state.set_site(SiteSelection::from_value(&opt.value));
                    state.site_query.clear();
                }
            }
        });
}

/// Payload range label, slider and colour grouping for the scatter chart.
pub fn payload_controls(ui: &mut Ui, state: &mut AppState) {
    ui.label("Payload range (Kg):");

    let Some(bounds) = state.dataset.as_ref().and_then(|ds| ds.payload_bounds) else {
        ui.label(RichText::new("No payload data").weak());
        return;
    };

    let mut range = state.payload_range();
    let step = state.config.payload_step;
    if ui
        .add(RangeSlider::new(&mut range, bounds.min, bounds.max, step))
        .changed()
    {
        state.set_payload_range(range);
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{:.0} – {:.0} kg", range.low, range.high));
        ui.separator();
        ui.label("Colour by");
        let current = state.color_by();
        egui::ComboBox::from_id_salt("color_by")
            .selected_text(current.label())
            .show_ui(ui, |ui: &mut Ui| {
                for option in ColorBy::ALL {
                    if ui
                        .selectable_label(current == option, option.label())
                        .clicked()
                    {
                        state.set_color_by(option);
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        // Errors are already logged and shown in the status bar.
        let _ = state.load_path(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export figures")
        .add_filter("JSON", &["json"])
        .set_file_name("figures.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_figures(&path) {
            log::error!("Failed to export figures: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
