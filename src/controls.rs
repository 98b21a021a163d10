//! Control descriptors shared by the desktop and web dashboards.

use serde::Serialize;

use crate::data::filter::ALL_SITES;
use crate::data::model::LaunchDataset;

pub const SITE_DROPDOWN_ID: &str = "site-dropdown";
pub const PAYLOAD_SLIDER_ID: &str = "payload-slider";
pub const PIE_CHART_ID: &str = "success-pie-chart";
pub const SCATTER_CHART_ID: &str = "success-payload-scatter-chart";

/// Payload slider step in kilograms.
pub const PAYLOAD_STEP: f64 = 1000.0;

/// One entry of the launch site selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

/// "All Sites" first, then one entry per distinct site.
pub fn site_options(dataset: &LaunchDataset) -> Vec<SiteOption> {
    let mut options = Vec::with_capacity(dataset.site_names().len() + 1);
    options.push(SiteOption {
        label: "All Sites".to_string(),
        value: ALL_SITES.to_string(),
    });
    options.extend(dataset.site_names().iter().map(|name| SiteOption {
        label: name.clone(),
        value: name.clone(),
    }));
    options
}

/// Bounds and step of the dual-handle payload control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl PayloadSlider {
    pub fn for_dataset(dataset: &LaunchDataset, step: f64) -> Self {
        let (min, max) = dataset.payload_bounds();
        PayloadSlider { min, max, step }
    }
}
