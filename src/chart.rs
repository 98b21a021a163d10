//! Chart specifications and the two reactive handlers that build them.
//!
//! Both handlers are pure functions of the loaded table and the current
//! control values; every control change re-evaluates them from scratch.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::color::{class_color, to_hex, ColorMap};
use crate::data::filter::{launches_at, launches_in_range, PayloadRange, SiteFilter};
use crate::data::model::{LaunchDataset, OutcomeClass, COL_CLASS, COL_PAYLOAD_MASS};

/// Scatter title; says "All Sites" even when one site is selected.
pub const SCATTER_TITLE: &str = "Success rate for Payload Mass (kg) - All Sites";

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub class: OutcomeClass,
    pub label: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Plotly figure JSON (`{"data": [...], "layout": {...}}`).
    pub fn to_plotly(&self) -> JsonValue {
        let labels: Vec<&str> = self.slices.iter().map(|s| s.label.as_str()).collect();
        let values: Vec<usize> = self.slices.iter().map(|s| s.value).collect();
        let colors: Vec<String> = self
            .slices
            .iter()
            .map(|s| to_hex(class_color(s.class)))
            .collect();
        json!({
            "data": [{
                "type": "pie",
                "labels": labels,
                "values": values,
                "marker": { "colors": colors },
                "sort": false,
            }],
            "layout": {
                "title": { "text": self.title },
                "legend": { "title": { "text": COL_CLASS } },
            },
        })
    }
}

/// Launch outcome counts for the selected site(s).
pub fn success_pie_chart(dataset: &LaunchDataset, site: &SiteFilter) -> PieChart {
    let mut counts: BTreeMap<OutcomeClass, usize> = BTreeMap::new();
    for rec in launches_at(dataset, site) {
        *counts.entry(rec.class).or_default() += 1;
    }

    let title = match site {
        SiteFilter::All => "Success rate for all sites".to_string(),
        SiteFilter::Site(name) => format!("Success rate for site {name}"),
    };

    PieChart {
        title,
        slices: counts
            .into_iter()
            .map(|(class, value)| PieSlice {
                class,
                label: class.to_string(),
                value,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Points sharing one booster version category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    /// `[payload mass, class]` pairs in table order.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Plotly figure JSON with one marker trace per booster category.
    pub fn to_plotly(&self, colors: &ColorMap) -> JsonValue {
        let traces: Vec<JsonValue> = self
            .series
            .iter()
            .map(|s| {
                let x: Vec<f64> = s.points.iter().map(|p| p[0]).collect();
                let y: Vec<f64> = s.points.iter().map(|p| p[1]).collect();
                json!({
                    "type": "scatter",
                    "mode": "markers",
                    "name": s.name,
                    "x": x,
                    "y": y,
                    "marker": { "color": to_hex(colors.color_for(&s.name)) },
                })
            })
            .collect();
        json!({
            "data": traces,
            "layout": {
                "title": { "text": self.title },
                "xaxis": { "title": { "text": self.x_label } },
                "yaxis": { "title": { "text": self.y_label } },
                "legend": { "title": { "text": "Booster Version Category" } },
            },
        })
    }
}

/// Payload mass against outcome for launches in `range` at the selected site(s),
/// coloured by booster version category.
pub fn success_payload_scatter_chart(
    dataset: &LaunchDataset,
    site: &SiteFilter,
    range: PayloadRange,
) -> ScatterChart {
    let mut by_category: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for rec in launches_in_range(dataset, site, range) {
        by_category
            .entry(rec.booster_version_category.as_str())
            .or_default()
            .push([rec.payload_mass_kg, f64::from(rec.class.code())]);
    }

    ScatterChart {
        title: SCATTER_TITLE.to_string(),
        x_label: COL_PAYLOAD_MASS.to_string(),
        y_label: COL_CLASS.to_string(),
        series: by_category
            .into_iter()
            .map(|(name, points)| ScatterSeries {
                name: name.to_string(),
                points,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{launch_table, three_launches};

    fn slice_values(chart: &PieChart) -> Vec<(&str, usize)> {
        chart
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect()
    }

    fn scatter_points(chart: &ScatterChart) -> Vec<[f64; 2]> {
        let mut pts: Vec<[f64; 2]> = chart
            .series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .collect();
        pts.sort_by(|a, b| a[0].total_cmp(&b[0]));
        pts
    }

    #[test]
    fn pie_for_all_sites() {
        let ds = three_launches();
        let chart = success_pie_chart(&ds, &SiteFilter::All);
        assert_eq!(chart.title, "Success rate for all sites");
        assert_eq!(slice_values(&chart), [("0", 1), ("1", 2)]);
    }

    #[test]
    fn pie_for_one_site() {
        let ds = three_launches();
        let chart = success_pie_chart(&ds, &SiteFilter::from_value("SiteB"));
        assert_eq!(chart.title, "Success rate for site SiteB");
        assert_eq!(slice_values(&chart), [("1", 1)]);
    }

    #[test]
    fn pie_for_all_sums_to_row_count() {
        let ds = launch_table();
        assert_eq!(success_pie_chart(&ds, &SiteFilter::All).total(), ds.len());
    }

    #[test]
    fn pie_per_site_counts_only_that_site() {
        let ds = launch_table();
        for site in ds.site_names() {
            let expected = ds
                .records()
                .iter()
                .filter(|r| &r.launch_site == site)
                .count();
            let filter = SiteFilter::Site(site.clone());
            assert!(launches_at(&ds, &filter).all(|r| &r.launch_site == site));
            let chart = success_pie_chart(&ds, &filter);
            assert_eq!(chart.total(), expected, "site {site}");
        }
    }

    #[test]
    fn pie_for_unknown_site_has_no_slices() {
        let ds = three_launches();
        let chart = success_pie_chart(&ds, &SiteFilter::from_value("Boca Chica"));
        assert!(chart.slices.is_empty());
        assert_eq!(chart.title, "Success rate for site Boca Chica");
    }

    #[test]
    fn scatter_range_example() {
        let ds = three_launches();
        let chart =
            success_payload_scatter_chart(&ds, &SiteFilter::All, PayloadRange::new(1000.0, 3000.0));
        assert_eq!(scatter_points(&chart), [[1500.0, 1.0], [2000.0, 0.0]]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].name, "FT");
    }

    #[test]
    fn scatter_points_respect_range_and_site() {
        let ds = launch_table();
        let site = SiteFilter::from_value("KSC LC-39A");
        let range = PayloadRange::new(2000.0, 5000.0);
        let chart = success_payload_scatter_chart(&ds, &site, range);
        assert_eq!(scatter_points(&chart), [[2490.0, 1.0], [3600.0, 1.0]]);
        for p in scatter_points(&chart) {
            assert!(range.contains(p[0]));
        }
    }

    #[test]
    fn scatter_title_is_constant() {
        let ds = launch_table();
        let chart = success_payload_scatter_chart(
            &ds,
            &SiteFilter::from_value("VAFB SLC-4E"),
            PayloadRange::full(&ds),
        );
        assert_eq!(chart.title, "Success rate for Payload Mass (kg) - All Sites");
        assert_eq!(chart.x_label, "Payload Mass (kg)");
        assert_eq!(chart.y_label, "class");
        assert_eq!(chart.point_count(), 2);
    }

    #[test]
    fn full_bounds_include_every_launch() {
        let ds = launch_table();
        let chart = success_payload_scatter_chart(&ds, &SiteFilter::All, PayloadRange::full(&ds));
        assert_eq!(chart.point_count(), ds.len());
        assert_eq!(chart.series.len(), ds.booster_categories().len());
    }

    #[test]
    fn handlers_are_idempotent() {
        let ds = launch_table();
        let site = SiteFilter::from_value("CCAFS LC-40");
        let range = PayloadRange::new(0.0, 3000.0);
        assert_eq!(success_pie_chart(&ds, &site), success_pie_chart(&ds, &site));
        assert_eq!(
            success_payload_scatter_chart(&ds, &site, range),
            success_payload_scatter_chart(&ds, &site, range)
        );
    }

    #[test]
    fn plotly_figures() {
        let ds = three_launches();
        let pie = success_pie_chart(&ds, &SiteFilter::All).to_plotly();
        assert_eq!(pie["data"][0]["type"], "pie");
        assert_eq!(pie["data"][0]["labels"], json!(["0", "1"]));
        assert_eq!(pie["data"][0]["values"], json!([1, 2]));
        assert_eq!(pie["layout"]["title"]["text"], "Success rate for all sites");

        let colors = ColorMap::new(ds.booster_categories());
        let scatter = success_payload_scatter_chart(&ds, &SiteFilter::All, PayloadRange::full(&ds))
            .to_plotly(&colors);
        let traces = scatter["data"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0]["name"], "FT");
        assert_eq!(traces[0]["x"], json!([2000.0, 1500.0]));
        assert_eq!(traces[0]["y"], json!([0.0, 1.0]));
        assert_eq!(scatter["layout"]["title"]["text"], SCATTER_TITLE);
    }
}
