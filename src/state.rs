use crate::chart::{success_pie_chart, success_payload_scatter_chart, PieChart, ScatterChart};
use crate::color::ColorMap;
use crate::controls::{site_options, PayloadSlider, SiteOption};
use crate::data::filter::{PayloadRange, SiteFilter};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The charts hold the output of the last control change; they are rebuilt
/// from the dataset whenever a control they depend on changes.
pub struct AppState {
    /// Loaded launch table.
    pub dataset: LaunchDataset,

    /// Entries of the site selector.
    pub site_options: Vec<SiteOption>,

    /// Payload control bounds and step.
    pub slider: PayloadSlider,

    /// Current site selection.
    pub site: SiteFilter,

    /// Current payload range (always within the slider bounds).
    pub payload_range: PayloadRange,

    /// Booster category colours for the scatter chart.
    pub color_map: ColorMap,

    pub pie_chart: PieChart,
    pub scatter_chart: ScatterChart,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: LaunchDataset, payload_step: f64) -> Self {
        let site = SiteFilter::All;
        let payload_range = PayloadRange::full(&dataset);
        Self {
            site_options: site_options(&dataset),
            slider: PayloadSlider::for_dataset(&dataset, payload_step),
            color_map: ColorMap::new(dataset.booster_categories()),
            pie_chart: success_pie_chart(&dataset, &site),
            scatter_chart: success_payload_scatter_chart(&dataset, &site, payload_range),
            site,
            payload_range,
            dataset,
            status_message: None,
        }
    }

    /// Replace the dataset and reset every control to its default.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        *self = AppState::new(dataset, self.slider.step);
    }

    /// Change the site selection; both charts depend on it.
    pub fn set_site(&mut self, site: SiteFilter) {
        if site == self.site {
            return;
        }
        self.site = site;
        self.pie_chart = success_pie_chart(&self.dataset, &self.site);
        self.refresh_scatter();
    }

    /// Move the payload handles; only the scatter chart depends on them.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let range = PayloadRange::clamped(low, high, (self.slider.min, self.slider.max));
        if range == self.payload_range {
            return;
        }
        self.payload_range = range;
        self.refresh_scatter();
    }

    fn refresh_scatter(&mut self) {
        self.scatter_chart =
            success_payload_scatter_chart(&self.dataset, &self.site, self.payload_range);
    }
}
