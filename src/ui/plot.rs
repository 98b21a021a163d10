use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{PieChart, ScatterChart};
use crate::color::{class_color, ColorMap};
use crate::controls::{PIE_CHART_ID, SCATTER_CHART_ID};
use crate::data::filter::PayloadRange;

/// Wedges wider than this are split so every polygon stays convex.
const MAX_WEDGE: f64 = FRAC_PI_2;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render the launch outcome pie chart.
pub fn pie_chart(ui: &mut Ui, chart: &PieChart) {
    ui.strong(&chart.title);

    let total = chart.total();
    if total == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches match the selected site.");
        });
        return;
    }

    Plot::new(PIE_CHART_ID)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            // Clockwise from twelve o'clock.
            let mut start = FRAC_PI_2;
            for slice in &chart.slices {
                let fraction = slice.value as f64 / total as f64;
                let sweep = fraction * TAU;
                let color = class_color(slice.class);

                let pieces = (sweep / MAX_WEDGE).ceil().max(1.0) as usize;
                let step = sweep / pieces as f64;
                for k in 0..pieces {
                    let a0 = start - k as f64 * step;
                    plot_ui.polygon(
                        Polygon::new(wedge(a0, a0 - step))
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }

                let mid = start - sweep / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                        RichText::new(format!("{:.1}%", fraction * 100.0)).strong(),
                    )
                    .color(Color32::WHITE),
                );
                start -= sweep;
            }
        });
}

/// Unit-circle wedge from angle `a0` to `a1`, centre first.
fn wedge(a0: f64, a1: f64) -> PlotPoints<'static> {
    const SEGMENTS: usize = 16;
    let mut pts = Vec::with_capacity(SEGMENTS + 2);
    pts.push([0.0, 0.0]);
    for i in 0..=SEGMENTS {
        let a = a0 + (a1 - a0) * i as f64 / SEGMENTS as f64;
        pts.push([a.cos(), a.sin()]);
    }
    PlotPoints::from(pts)
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload mass against outcome, one colour per booster category.
pub fn scatter_chart(ui: &mut Ui, chart: &ScatterChart, colors: &ColorMap, bounds: PayloadRange) {
    ui.strong(&chart.title);
    category_legend(ui, colors);

    Plot::new(SCATTER_CHART_ID)
        .x_axis_label(&chart.x_label)
        .y_axis_label(&chart.y_label)
        .include_x(bounds.low())
        .include_x(bounds.high())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points: PlotPoints = series.points.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.name)
                        .color(colors.color_for(&series.name))
                        .radius(4.0),
                );
            }
        });
}

/// Swatch row for every booster category in the dataset, including ones
/// filtered out of the current chart so colours stay recognisable.
fn category_legend(ui: &mut Ui, colors: &ColorMap) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("Booster Version Category:");
        for (label, color) in colors.legend_entries() {
            ui.label(RichText::new("⏺").color(color));
            ui.label(label);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_starts_at_centre_and_spans_arc() {
        let pts = wedge(FRAC_PI_2, 0.0);
        let pts = pts.points();
        assert_eq!(pts.len(), 18);
        assert_eq!((pts[0].x, pts[0].y), (0.0, 0.0));
        assert!((pts[1].y - 1.0).abs() < 1e-12);
        assert!((pts[17].x - 1.0).abs() < 1e-12);
    }
}
