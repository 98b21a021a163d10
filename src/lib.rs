//! SpaceX launch records dashboard.
//!
//! Loads a launch table once, then turns the current site selection and
//! payload range into two charts: an outcome pie and a payload/outcome
//! scatter. The same chart specifications are drawn natively with egui
//! (`spacex-dash`) or served as Plotly figures over HTTP
//! (`spacex-dash-serve`).

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod controls;
pub mod data;
pub mod state;
pub mod ui;
pub mod web;
