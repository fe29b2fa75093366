use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::DashboardConfig;
use crate::data::filter::{filtered_indices, PayloadRange, SiteSelection};
use crate::data::loader::load_file;
use crate::data::model::{LaunchDataset, LaunchRecord};
use crate::figures::{
    payload_scatter, success_pie, ColorBy, FigureExport, PieFigure, ScatterFigure,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The two figures are cached and only rebuilt when one of their inputs
/// changes: the pie depends on the site, the scatter on the site, the payload
/// range and the colour grouping.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<LaunchDataset>,

    /// Where `dataset` came from.
    pub dataset_path: Option<PathBuf>,

    site: SiteSelection,
    payload_range: PayloadRange,
    color_by: ColorBy,

    pie: PieFigure,
    scatter: ScatterFigure,

    /// Text typed into the searchable site dropdown.
    pub site_query: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let site = config
            .site_options
            .first()
            .map(|o| SiteSelection::from_value(&o.value))
            .unwrap_or_default();
        Self {
            config,
            dataset: None,
            dataset_path: None,
            site,
            payload_range: PayloadRange::new(0.0, 0.0),
            color_by: ColorBy::default(),
            pie: PieFigure::default(),
            scatter: ScatterFigure::default(),
            site_query: String::new(),
            status_message: None,
        }
    }

    // -- inputs --

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    pub fn color_by(&self) -> ColorBy {
        self.color_by
    }

    // -- outputs --

    pub fn pie(&self) -> &PieFigure {
        &self.pie
    }

    pub fn scatter(&self) -> &ScatterFigure {
        &self.scatter
    }

    /// Ingest a newly loaded dataset: reset the slider to its full span and
    /// rebuild both figures.
    pub fn set_dataset(&mut self, dataset: LaunchDataset, path: Option<PathBuf>) {
        self.payload_range = dataset
            .payload_bounds
            .map(PayloadRange::full)
            .unwrap_or(PayloadRange::new(0.0, 0.0));
        self.dataset = Some(dataset);
        self.dataset_path = path;
        self.status_message = None;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Load a file and make it the current dataset. On failure the previous
    /// dataset stays and the error is shown in the status bar.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        match load_file(path) {
            Ok(dataset) => {
                self.set_dataset(dataset, Some(path.to_path_buf()));
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                Err(e)
            }
        }
    }

    pub fn set_site(&mut self, site: SiteSelection) {
        if site == self.site {
            return;
        }
        self.site = site;
        self.recompute_pie();
        self.recompute_scatter();
    }

    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        self.payload_range = range;
        self.recompute_scatter();
    }

    pub fn set_color_by(&mut self, color_by: ColorBy) {
        if color_by == self.color_by {
            return;
        }
        self.color_by = color_by;
        self.recompute_scatter();
    }

    /// Records currently plotted in the scatter chart.
    pub fn visible_records(&self) -> Vec<&LaunchRecord> {
        let Some(ds) = &self.dataset else {
            return Vec::new();
        };
        filtered_indices(ds, &self.site, self.payload_range)
            .into_iter()
            .map(|i| &ds.records[i])
            .collect()
    }

    /// Write both figures as pretty JSON.
    pub fn export_figures(&self, path: &Path) -> Result<()> {
        let export = FigureExport {
            site: self.site.value(),
            payload_range: [self.payload_range.low, self.payload_range.high],
            pie: &self.pie,
            scatter: &self.scatter,
        };
        let json = serde_json::to_string_pretty(&export).context("serializing figures")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported figures to {}", path.display());
        Ok(())
    }

    fn recompute_pie(&mut self) {
        self.pie = match &self.dataset {
            Some(ds) => success_pie(ds, &self.site),
            None => PieFigure::default(),
        };
        log::debug!("pie recomputed for {}: {} slices", self.site, self.pie.slices.len());
    }

    fn recompute_scatter(&mut self) {
        self.scatter = match &self.dataset {
            Some(ds) => payload_scatter(ds, &self.site, self.payload_range, self.color_by),
            None => ScatterFigure::default(),
        };
        log::debug!(
            "scatter recomputed for {} [{}, {}]: {} points",
            self.site,
            self.payload_range.low,
            self.payload_range.high,
            self.scatter.point_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(
            LaunchDataset::from_records(vec![
                record("KSC LC 39A", 500.0, "F9 FT", 1),
                record("KSC LC 39A", 4000.0, "F9 B4", 0),
                record("CCAFS SLC 40", 2500.0, "F9 v1.1", 1),
                record("VAFB SLC 4E", 9600.0, "F9 B5", 1),
            ]),
            None,
        );
        state
    }

    #[test]
    fn starts_on_all_sites_with_full_range() {
        let state = loaded_state();
        assert_eq!(state.site(), &SiteSelection::All);
        assert_eq!(state.payload_range(), PayloadRange::new(500.0, 9600.0));
        assert_eq!(state.pie().total(), 3);
        assert_eq!(state.scatter().point_count(), 4);
        assert_eq!(state.visible_records().len(), 4);
    }

    #[test]
    fn all_sites_full_range_reproduces_success_distribution() {
        let state = loaded_state();
        let ds = state.dataset.as_ref().expect("dataset");
        let successes = ds.records.iter().filter(|r| r.class.is_success()).count();
        assert_eq!(state.pie().total(), successes);
    }

    #[test]
    fn payload_change_only_rebuilds_scatter() {
        let mut state = loaded_state();
        state.set_site(SiteSelection::from_value("KSC LC 39A"));
        let pie_before = state.pie().clone();

        state.set_payload_range(PayloadRange::new(600.0, 1000.0));
        assert_eq!(state.pie(), &pie_before);
        assert_eq!(state.scatter().point_count(), 0);

        state.set_payload_range(PayloadRange::new(0.0, 1000.0));
        assert_eq!(state.scatter().point_count(), 1);
        assert_eq!(state.visible_records()[0].payload_mass_kg, 500.0);
    }

    #[test]
    fn site_change_rebuilds_both_figures() {
        let mut state = loaded_state();
        state.set_site(SiteSelection::from_value("VAFB SLC 4E"));
        assert_eq!(state.pie().title, "Total Success Launches for VAFB SLC 4E");
        assert_eq!(state.scatter().title, "Payload vs. Launch Success for VAFB SLC 4E");
        assert_eq!(state.scatter().point_count(), 1);
    }

    #[test]
    fn color_by_regroups_scatter() {
        let mut state = loaded_state();
        state.set_color_by(ColorBy::BoosterCategory);
        assert_eq!(state.scatter().color_label, "Booster Version Category");
        assert_eq!(state.scatter().point_count(), 4);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = loaded_state();
        assert!(state.load_path(Path::new("does/not/exist.csv")).is_err());
        assert_eq!(state.dataset.as_ref().map(LaunchDataset::len), Some(4));
        assert!(state.status_message.as_deref().is_some_and(|m| m.starts_with("Error")));
    }

    #[test]
    fn export_writes_both_figures() {
        let state = loaded_state();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("figures.json");
        state.export_figures(&path).expect("export");

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(json["site"], "ALL");
        assert_eq!(json["pie"]["title"], "Total Success Launches by Site");
        assert_eq!(json["scatter"]["traces"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn without_dataset_figures_are_empty() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_site(SiteSelection::from_value("KSC LC 39A"));
        assert!(state.pie().slices.is_empty());
        assert!(state.visible_records().is_empty());
    }
}
