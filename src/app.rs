use eframe::egui;
use egui_extras::{Size, StripBuilder};

use crate::data::filter::PayloadRange;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpacexDashApp {
    pub state: AppState,
}

impl SpacexDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SpacexDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie above scatter ----
        let state = &self.state;
        let (min, max) = state.dataset.payload_bounds();
        egui::CentralPanel::default().show(ctx, |ui| {
            StripBuilder::new(ui)
                .size(Size::relative(0.5))
                .size(Size::remainder())
                .vertical(|mut strip| {
                    strip.cell(|ui| plot::pie_chart(ui, &state.pie_chart));
                    strip.cell(|ui| {
                        plot::scatter_chart(
                            ui,
                            &state.scatter_chart,
                            &state.color_map,
                            PayloadRange::new(min, max),
                        )
                    });
                });
        });
    }
}
