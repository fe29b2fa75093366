//! Chart descriptions and the two pure functions that build them.
//!
//! A figure is plain data: the UI layer decides how to draw it, and the
//! File menu can export it as JSON.

pub mod pie;
pub mod scatter;

use serde::Serialize;

pub use pie::success_pie;
pub use scatter::payload_scatter;

/// One wedge of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PieFigure {
    pub title: String,
    /// Legend title for the slice names.
    pub names_label: String,
    pub slices: Vec<PieSlice>,
}

impl PieFigure {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// A group of scatter points sharing one colour and legend entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    /// `[x, y]` pairs.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScatterFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    pub traces: Vec<ScatterTrace>,
}

impl ScatterFigure {
    pub fn point_count(&self) -> usize {
        self.traces.iter().map(|t| t.points.len()).sum()
    }
}

/// How scatter points are grouped into coloured traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ColorBy {
    #[default]
    BoosterVersion,
    BoosterCategory,
}

impl ColorBy {
    pub const ALL: [ColorBy; 2] = [ColorBy::BoosterVersion, ColorBy::BoosterCategory];

    pub fn label(self) -> &'static str {
        match self {
            ColorBy::BoosterVersion => "Booster Version",
            ColorBy::BoosterCategory => "Booster Version Category",
        }
    }
}

/// Both figures together, as written by File → Export figures….
#[derive(Debug, Serialize)]
pub struct FigureExport<'a> {
    pub site: &'a str,
    pub payload_range: [f64; 2],
    pub pie: &'a PieFigure,
    pub scatter: &'a ScatterFigure,
}
