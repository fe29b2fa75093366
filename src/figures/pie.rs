use std::collections::BTreeMap;

use crate::data::filter::{select, SiteSelection};
use crate::data::model::{LaunchDataset, COL_LAUNCH_SITE};

use super::{PieFigure, PieSlice};

/// Successful launches per site, for the selected site(s).
///
/// A single-site selection still groups by site, so it produces at most one
/// slice. An unknown site produces an empty figure.
pub fn success_pie(dataset: &LaunchDataset, site: &SiteSelection) -> PieFigure {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in select(dataset, site, None).filter(|r| r.class.is_success()) {
        *counts.entry(rec.launch_site.as_str()).or_default() += 1;
    }

    // Largest first; BTreeMap iteration already breaks ties by name and the
    // sort is stable.
    let mut slices: Vec<PieSlice> = counts
        .into_iter()
        .map(|(label, value)| PieSlice {
            label: label.to_string(),
            value,
        })
        .collect();
    slices.sort_by(|a, b| b.value.cmp(&a.value));

    let title = match site {
        SiteSelection::All => "Total Success Launches by Site".to_string(),
        SiteSelection::Site(name) => format!("Total Success Launches for {name}"),
    };

    PieFigure {
        title,
        names_label: COL_LAUNCH_SITE.to_string(),
        slices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("CCAFS SLC 40", 0.0, "F9 v1.0", 0),
            record("CCAFS SLC 40", 2500.0, "F9 v1.1", 1),
            record("KSC LC 39A", 500.0, "F9 FT", 1),
            record("KSC LC 39A", 5300.0, "F9 FT", 1),
            record("KSC LC 39A", 6000.0, "F9 B4", 0),
            record("VAFB SLC 4E", 9600.0, "F9 B5", 1),
        ])
    }

    #[test]
    fn all_sites_counts_successes_per_site() {
        let fig = success_pie(&dataset(), &SiteSelection::All);
        assert_eq!(fig.title, "Total Success Launches by Site");
        let got: Vec<(&str, usize)> = fig
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect();
        assert_eq!(
            got,
            vec![("KSC LC 39A", 2), ("CCAFS SLC 40", 1), ("VAFB SLC 4E", 1)]
        );
        assert_eq!(fig.total(), 4);
    }

    #[test]
    fn single_site_yields_one_slice_of_its_successes() {
        let site = SiteSelection::from_value("KSC LC 39A");
        let fig = success_pie(&dataset(), &site);
        assert_eq!(fig.title, "Total Success Launches for KSC LC 39A");
        assert_eq!(
            fig.slices,
            vec![PieSlice {
                label: "KSC LC 39A".into(),
                value: 2
            }]
        );
    }

    #[test]
    fn site_without_successes_or_unknown_site_is_empty() {
        let ds = LaunchDataset::from_records(vec![record("CCAFS SLC 40", 0.0, "F9 v1.0", 0)]);
        assert!(success_pie(&ds, &SiteSelection::from_value("CCAFS SLC 40"))
            .slices
            .is_empty());
        assert!(success_pie(&dataset(), &SiteSelection::from_value("CCAFS LC-40"))
            .slices
            .is_empty());
    }

    #[test]
    fn only_successes_at_the_selected_site_are_counted() {
        let ds = dataset();
        let mut selections = vec![SiteSelection::All];
        selections.extend(ds.sites.iter().map(|s| SiteSelection::Site(s.clone())));

        for sel in &selections {
            let fig = success_pie(&ds, sel);
            let expected = ds
                .records
                .iter()
                .filter(|r| r.class.is_success() && sel.matches(r))
                .count();
            assert_eq!(fig.total(), expected, "selection {sel}");
            for slice in &fig.slices {
                let rec = ds
                    .records
                    .iter()
                    .find(|r| r.launch_site == slice.label)
                    .expect("slice names a loaded site");
                assert!(sel.matches(rec));
            }
        }
    }
}
