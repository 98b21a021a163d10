use eframe::egui::{self, Color32, RichText, Ui};

use crate::controls::{PAYLOAD_SLIDER_ID, SITE_DROPDOWN_ID};
use crate::data::filter::SiteFilter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the site selector and payload range control.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(
            RichText::new("SpaceX Launch Records Dashboard")
                .color(Color32::from_rgb(0x50, 0x3d, 0x36)),
        );
    });
    ui.separator();

    // ---- Launch site ----
    ui.strong("Launch Site");
    let current = state.site.clone();
    let selected_label = state
        .site_options
        .iter()
        .find(|opt| opt.value == current.value())
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| current.value().to_string());

    let mut picked: Option<SiteFilter> = None;
    egui::ComboBox::from_id_salt(SITE_DROPDOWN_ID)
        .selected_text(selected_label)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &state.site_options {
                if ui
                    .selectable_label(opt.value == current.value(), &opt.label)
                    .clicked()
                {
                    picked = Some(SiteFilter::from_value(&opt.value));
                }
            }
        });
    if let Some(site) = picked {
        log::debug!("site selected: {site}");
        state.set_site(site);
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let slider = state.slider;
    let mut low = state.payload_range.low();
    let mut high = state.payload_range.high();

    ui.push_id(PAYLOAD_SLIDER_ID, |ui: &mut Ui| {
        let low_changed = ui
            .add(
                egui::Slider::new(&mut low, slider.min..=slider.max)
                    .step_by(slider.step)
                    .text("min"),
            )
            .changed();
        let high_changed = ui
            .add(
                egui::Slider::new(&mut high, slider.min..=slider.max)
                    .step_by(slider.step)
                    .text("max"),
            )
            .changed();

        // The dragged handle pushes the other one along instead of crossing it.
        if low_changed && low > high {
            high = low;
        }
        if high_changed && high < low {
            low = high;
        }
        if low_changed || high_changed {
            state.set_payload_range(low, high);
        }
    });

    if ui.small_button("Reset range").clicked() {
        state.set_payload_range(slider.min, slider.max);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in range",
            state.dataset.len(),
            state.scatter_chart.point_count()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("Replaced dataset with {}", path.display());
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
