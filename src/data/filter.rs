use std::fmt;

use serde::Serialize;

use super::model::{LaunchDataset, LaunchRecord, PayloadBounds};

// ---------------------------------------------------------------------------
// Site selection – the dropdown value
// ---------------------------------------------------------------------------

/// Dropdown value meaning "every launch site".
pub const ALL_SITES: &str = "ALL";

/// Which launch site(s) the charts are restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a raw dropdown value. Anything but the `ALL` sentinel is
    /// taken literally as a site name, known or not.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(name) => name,
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(name) => record.launch_site == *name,
        }
    }
}

impl From<SiteSelection> for String {
    fn from(sel: SiteSelection) -> Self {
        sel.value().to_string()
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// ---------------------------------------------------------------------------
// Payload range – the slider value
// ---------------------------------------------------------------------------

/// Inclusive `[low, high]` payload window in kg. An inverted window
/// (`low > high`) is allowed and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// The slider's initial value: the dataset's whole payload span.
    pub fn full(bounds: PayloadBounds) -> Self {
        PayloadRange {
            low: bounds.min,
            high: bounds.max,
        }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Records at the selected site(s), optionally restricted to a payload window.
pub fn select<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteSelection,
    range: Option<PayloadRange>,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset
        .records
        .iter()
        .filter(move |rec| site.matches(rec))
        .filter(move |rec| range.map_or(true, |r| r.contains(rec.payload_mass_kg)))
}

/// Indices of the records passing both the site and the payload filter.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| site.matches(rec) && range.contains(rec.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}
