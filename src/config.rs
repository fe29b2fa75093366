use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::data::filter::ALL_SITES;

/// Optional config file looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// One entry of the launch-site dropdown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

impl SiteOption {
    fn new(label: &str, value: &str) -> Self {
        SiteOption {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Startup settings. Every field has a default, so a config file only needs
/// the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset loaded when the window opens.
    pub dataset_path: PathBuf,
    /// Dropdown entries, in display order. The first one is selected at start.
    pub site_options: Vec<SiteOption>,
    /// Payload slider step and mark spacing, in kg.
    pub payload_step: f64,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("spacex_launch_dash.csv"),
            site_options: vec![
                SiteOption::new("All Sites", ALL_SITES),
                SiteOption::new("CCAFS SLC 40", "CCAFS SLC 40"),
                SiteOption::new("KSC LC 39A", "KSC LC 39A"),
                SiteOption::new("VAFB SLC 4E", "VAFB SLC 4E"),
            ],
            payload_step: 1000.0,
            window_size: [1100.0, 900.0],
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(text).context("parsing config JSON")?;
        ensure!(
            config.payload_step.is_finite() && config.payload_step > 0.0,
            "payload_step must be a positive number, got {}",
            config.payload_step
        );
        ensure!(!config.site_options.is_empty(), "site_options must not be empty");
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Use [`CONFIG_FILE`] when it exists, falling back to defaults (with an
    /// error log) when it is missing or invalid.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Using configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Ignoring invalid configuration: {e:#}");
                Self::default()
            }
        }
    }
}
