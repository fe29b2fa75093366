use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";
pub const COL_CLASS: &str = "class";

/// Columns every input file must provide, in display order.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_BOOSTER_VERSION,
    COL_CLASS,
];

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome class: `1` is a successful landing, `0` a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn as_f64(self) -> f64 {
        u8::from(self) as f64
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }
}

impl TryFrom<f64> for Outcome {
    type Error = RowError;

    /// Accepts `0`/`1` as well as `0.0`/`1.0`, which is how pandas writes an
    /// integer column that once held a NaN.
    fn try_from(v: f64) -> Result<Self, Self::Error> {
        if v == 0.0 {
            Ok(Outcome::Failure)
        } else if v == 1.0 {
            Ok(Outcome::Success)
        } else {
            Err(RowError::InvalidClass(v.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// Row-level errors
// ---------------------------------------------------------------------------

/// Why a single input row was rejected. Rejected rows are skipped by the
/// loaders, never shown in the charts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("missing value for '{0}'")]
    MissingField(&'static str),
    #[error("payload mass '{0}' is not a number")]
    InvalidPayload(String),
    #[error("class '{0}' is not 0 or 1")]
    InvalidClass(String),
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub booster_version: String,
    pub class: Outcome,
}

impl LaunchRecord {
    /// Build a record from the four raw text cells of a row.
    pub fn from_text(
        site: Option<&str>,
        payload: Option<&str>,
        booster: Option<&str>,
        class: Option<&str>,
    ) -> Result<Self, RowError> {
        let site = non_empty(site).ok_or(RowError::MissingField(COL_LAUNCH_SITE))?;
        let booster = non_empty(booster).ok_or(RowError::MissingField(COL_BOOSTER_VERSION))?;

        let payload_raw = non_empty(payload).ok_or(RowError::MissingField(COL_PAYLOAD_MASS))?;
        let payload_mass_kg = parse_finite(payload_raw)
            .ok_or_else(|| RowError::InvalidPayload(payload_raw.to_string()))?;

        let class_raw = non_empty(class).ok_or(RowError::MissingField(COL_CLASS))?;
        let class = parse_finite(class_raw)
            .ok_or_else(|| RowError::InvalidClass(class_raw.to_string()))
            .and_then(Outcome::try_from)?;

        Ok(LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg,
            booster_version: booster.to_string(),
            class,
        })
    }

    /// Build a record from already-typed cells (columnar sources).
    pub fn from_values(
        site: Option<&str>,
        payload: Option<f64>,
        booster: Option<&str>,
        class: Option<f64>,
    ) -> Result<Self, RowError> {
        let site = non_empty(site).ok_or(RowError::MissingField(COL_LAUNCH_SITE))?;
        let booster = non_empty(booster).ok_or(RowError::MissingField(COL_BOOSTER_VERSION))?;
        let payload_mass_kg = payload.ok_or(RowError::MissingField(COL_PAYLOAD_MASS))?;
        if !payload_mass_kg.is_finite() {
            return Err(RowError::InvalidPayload(payload_mass_kg.to_string()));
        }
        let class = Outcome::try_from(class.ok_or(RowError::MissingField(COL_CLASS))?)?;

        Ok(LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg,
            booster_version: booster.to_string(),
            class,
        })
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Booster category
// ---------------------------------------------------------------------------

/// Coarse booster family, read off a version string such as `F9 v1.1 B1011`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BoosterCategory {
    V1_0,
    V1_1,
    FullThrust,
    Block4,
    Block5,
    Other,
}

impl BoosterCategory {
    pub const KNOWN: [BoosterCategory; 5] = [
        BoosterCategory::V1_0,
        BoosterCategory::V1_1,
        BoosterCategory::FullThrust,
        BoosterCategory::Block4,
        BoosterCategory::Block5,
    ];

    /// The first whitespace-separated token naming a known category wins.
    pub fn classify(booster_version: &str) -> Self {
        booster_version
            .split_whitespace()
            .find_map(|tok| Self::KNOWN.into_iter().find(|c| c.label() == tok))
            .unwrap_or(BoosterCategory::Other)
    }

    pub fn label(self) -> &'static str {
        match self {
            BoosterCategory::V1_0 => "v1.0",
            BoosterCategory::V1_1 => "v1.1",
            BoosterCategory::FullThrust => "FT",
            BoosterCategory::Block4 => "B4",
            BoosterCategory::Block5 => "B5",
            BoosterCategory::Other => "Other",
        }
    }
}

impl fmt::Display for BoosterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PayloadBounds – observed min/max of the payload column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All launch records plus indices computed once at load time.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    pub records: Vec<LaunchRecord>,
    /// Sorted unique launch sites.
    pub sites: BTreeSet<String>,
    /// Sorted unique booster version strings.
    pub booster_versions: BTreeSet<String>,
    /// `None` when there are no records.
    pub payload_bounds: Option<PayloadBounds>,
}

impl LaunchDataset {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites = BTreeSet::new();
        let mut booster_versions = BTreeSet::new();
        let mut payload_bounds: Option<PayloadBounds> = None;

        for rec in &records {
            sites.insert(rec.launch_site.clone());
            booster_versions.insert(rec.booster_version.clone());
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                None => PayloadBounds { min: m, max: m },
                Some(b) => PayloadBounds {
                    min: b.min.min(m),
                    max: b.max.max(m),
                },
            });
        }

        LaunchDataset {
            records,
            sites,
            booster_versions,
            payload_bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(site: &str, payload: f64, booster: &str, class: u8) -> LaunchRecord {
    LaunchRecord {
        launch_site: site.to_string(),
        payload_mass_kg: payload,
        booster_version: booster.to_string(),
        class: if class == 1 {
            Outcome::Success
        } else {
            Outcome::Failure
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_parses_a_well_formed_row() {
        let rec = LaunchRecord::from_text(
            Some("KSC LC 39A"),
            Some(" 500 "),
            Some("F9 FT B1021"),
            Some("1"),
        )
        .expect("valid row");
        assert_eq!(rec, record("KSC LC 39A", 500.0, "F9 FT B1021", 1));
    }

    #[test]
    fn from_text_rejects_bad_cells() {
        let err = LaunchRecord::from_text(Some("A"), Some("heavy"), Some("FT"), Some("1"));
        assert_eq!(err, Err(RowError::InvalidPayload("heavy".into())));

        let err = LaunchRecord::from_text(Some("A"), Some("10"), Some("FT"), Some("2"));
        assert_eq!(err, Err(RowError::InvalidClass("2".into())));

        let err = LaunchRecord::from_text(Some("A"), Some(""), Some("FT"), Some("0"));
        assert_eq!(err, Err(RowError::MissingField(COL_PAYLOAD_MASS)));
    }

    #[test]
    fn float_class_values_are_accepted() {
        assert_eq!(Outcome::try_from(1.0), Ok(Outcome::Success));
        assert_eq!(Outcome::try_from(0.0), Ok(Outcome::Failure));
        assert!(Outcome::try_from(0.5).is_err());
    }

    #[test]
    fn booster_category_reads_the_family_token() {
        assert_eq!(BoosterCategory::classify("F9 v1.0  B0003"), BoosterCategory::V1_0);
        assert_eq!(BoosterCategory::classify("F9 v1.1 B1011"), BoosterCategory::V1_1);
        assert_eq!(BoosterCategory::classify("F9 FT B1029.1"), BoosterCategory::FullThrust);
        assert_eq!(BoosterCategory::classify("F9 B4 B1039.2"), BoosterCategory::Block4);
        assert_eq!(BoosterCategory::classify("F9 B5 B1046.1"), BoosterCategory::Block5);
        assert_eq!(BoosterCategory::classify("Falcon Heavy"), BoosterCategory::Other);
    }

    #[test]
    fn dataset_indices_cover_all_records() {
        let ds = LaunchDataset::from_records(vec![
            record("VAFB SLC 4E", 9600.0, "F9 B5", 1),
            record("CCAFS SLC 40", 0.0, "F9 v1.0", 0),
            record("VAFB SLC 4E", 475.0, "F9 FT", 1),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.sites.iter().map(String::as_str).collect::<Vec<_>>(),
            ["CCAFS SLC 40", "VAFB SLC 4E"]
        );
        assert_eq!(ds.booster_versions.len(), 3);
        assert_eq!(
            ds.payload_bounds,
            Some(PayloadBounds { min: 0.0, max: 9600.0 })
        );
        assert_eq!(LaunchDataset::default().payload_bounds, None);
    }
}
