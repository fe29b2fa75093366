use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues, starting
/// from a blue so a single series looks like a default chart colour.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    const START_HUE: f32 = 215.0;
    (0..n)
        .map(|i| {
            let hue = START_HUE + (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.7, 0.55).into_color();
            let (r, g, b) = rgb.into_format::<u8>().into_components();
            Color32::from_rgb(r, g, b)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: label → Color32
// ---------------------------------------------------------------------------

/// Assigns palette colours to chart series in the order they are given,
/// like a plotting library walking its colour cycle.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    mapping: HashMap<String, Color32>,
}

impl SeriesColors {
    pub fn new<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels: Vec<&str> = labels.into_iter().collect();
        let mapping = labels
            .iter()
            .zip(generate_palette(labels.len()))
            .map(|(l, c)| (l.to_string(), c))
            .collect();
        SeriesColors { mapping }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}
