use crate::data::filter::{select, PayloadRange, SiteSelection};
use crate::data::model::{BoosterCategory, LaunchDataset, COL_CLASS, COL_PAYLOAD_MASS};

use super::{ColorBy, ScatterFigure, ScatterTrace};

/// Payload mass against outcome class for the selected site(s) and payload
/// window, one trace per booster group in order of first appearance.
pub fn payload_scatter(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
    color_by: ColorBy,
) -> ScatterFigure {
    let mut traces: Vec<ScatterTrace> = Vec::new();

    for rec in select(dataset, site, Some(range)) {
        let group = match color_by {
            ColorBy::BoosterVersion => rec.booster_version.clone(),
            ColorBy::BoosterCategory => BoosterCategory::classify(&rec.booster_version)
                .label()
                .to_string(),
        };
        let point = [rec.payload_mass_kg, rec.class.as_f64()];

        match traces.iter_mut().find(|t| t.name == group) {
            Some(trace) => trace.points.push(point),
            None => traces.push(ScatterTrace {
                name: group,
                points: vec![point],
            }),
        }
    }

    let title = match site {
        SiteSelection::All => "Payload vs. Launch Success for All Sites".to_string(),
        SiteSelection::Site(name) => format!("Payload vs. Launch Success for {name}"),
    };

    ScatterFigure {
        title,
        x_label: COL_PAYLOAD_MASS.to_string(),
        y_label: COL_CLASS.to_string(),
        color_label: color_by.label().to_string(),
        traces,
    }
}
