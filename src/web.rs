//! Web dashboard: the same two charts served as Plotly figures.
//!
//! # Routes
//!
//! | Route | Handler |
//! |---|---|
//! | `/` | Dashboard page |
//! | `/api/options` | Site selector entries and payload slider bounds |
//! | `/api/pie?site=` | Outcome pie figure |
//! | `/api/scatter?site=&low=&high=` | Payload scatter figure |

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::chart::{success_payload_scatter_chart, success_pie_chart};
use crate::color::ColorMap;
use crate::controls::{site_options, PayloadSlider};
use crate::data::filter::{PayloadRange, SiteFilter};
use crate::data::model::LaunchDataset;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Shared, read-only state for the web handlers.
#[derive(Clone)]
pub struct WebState {
    pub dataset: Arc<LaunchDataset>,
    pub colors: Arc<ColorMap>,
    pub payload_step: f64,
}

impl WebState {
    pub fn new(dataset: LaunchDataset, payload_step: f64) -> Self {
        let colors = ColorMap::new(dataset.booster_categories());
        Self {
            dataset: Arc::new(dataset),
            colors: Arc::new(colors),
            payload_step,
        }
    }
}

/// Build the dashboard router.
pub fn dashboard_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/options", get(options))
        .route("/api/pie", get(pie))
        .route("/api/scatter", get(scatter))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct PieQuery {
    pub site: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScatterQuery {
    pub site: Option<String>,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

fn site_filter(site: Option<&str>) -> SiteFilter {
    site.map(SiteFilter::from_value).unwrap_or_default()
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn options(State(state): State<WebState>) -> Json<JsonValue> {
    let slider = PayloadSlider::for_dataset(&state.dataset, state.payload_step);
    Json(json!({
        "sites": site_options(&state.dataset),
        "payload": slider,
    }))
}

async fn pie(State(state): State<WebState>, Query(q): Query<PieQuery>) -> Json<JsonValue> {
    let site = site_filter(q.site.as_deref());
    log::debug!("pie chart for {site}");
    Json(success_pie_chart(&state.dataset, &site).to_plotly())
}

async fn scatter(State(state): State<WebState>, Query(q): Query<ScatterQuery>) -> Json<JsonValue> {
    let site = site_filter(q.site.as_deref());
    let (min, max) = state.dataset.payload_bounds();
    let range = PayloadRange::clamped(q.low.unwrap_or(min), q.high.unwrap_or(max), (min, max));
    log::debug!("scatter chart for {site}, payload {range:?}");
    Json(success_payload_scatter_chart(&state.dataset, &site, range).to_plotly(&state.colors))
}
