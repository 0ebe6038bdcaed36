use std::f64::consts::{FRAC_PI_2, FRAC_PI_8};

use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::{self, RegionColors};
use crate::data::aggregate::{PointCategory, RegionAverage, RegionShare, ScatterPoint};
use crate::data::filter::PlotSize;
use crate::data::model::SmokerStatus;
use crate::state::AppState;

const DEFAULT_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Chart panes (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter, bar and (optionally) pie charts.
pub fn charts(ui: &mut Ui, state: &AppState) {
    let size = state.criteria.plot_size;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("BMI vs. Charges (Colored by Smoker Status)");
            scatter_plot(ui, &state.charts.selection.value().points, size);
            ui.add_space(12.0);

            ui.strong("Average Charges by Region");
            bar_plot(ui, state.charts.bars.value(), &state.region_colors, size);

            if state.show_pie {
                ui.add_space(12.0);
                ui.strong("Total Charges by Region");
                match state.charts.pie.value() {
                    Ok(shares) => pie_plot(ui, shares, &state.region_colors, size),
                    Err(e) => placeholder(ui, &e.to_string(), size),
                }
            }
        });
}

fn sized(plot: Plot<'_>, size: Option<PlotSize>) -> Plot<'_> {
    match size {
        Some(PlotSize { width, height }) => plot.width(width).height(height),
        None => plot.height(DEFAULT_HEIGHT),
    }
}

fn placeholder(ui: &mut Ui, message: &str, size: Option<PlotSize>) {
    let height = size.map_or(DEFAULT_HEIGHT, |s| s.height);
    ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(message);
        });
    });
}

fn category_label(category: &PointCategory) -> String {
    match category {
        PointCategory::Known(status) => status.to_string(),
        PointCategory::Unmapped(value) => value.clone(),
    }
}

pub fn scatter_plot(ui: &mut Ui, points: &[ScatterPoint], size: Option<PlotSize>) {
    if points.is_empty() {
        placeholder(ui, "No records match the current filters", size);
        return;
    }

    // One series per category so the legend reads smoker / nonsmoker.
    let categories = [
        PointCategory::Known(SmokerStatus::Smoker),
        PointCategory::Known(SmokerStatus::NonSmoker),
    ];
    let unmapped: Vec<&ScatterPoint> = points
        .iter()
        .filter(|p| matches!(p.category, PointCategory::Unmapped(_)))
        .collect();

    sized(Plot::new("scatter_plot"), size)
        .legend(Legend::default().position(egui_plot::Corner::RightTop))
        .x_axis_label("BMI")
        .y_axis_label("Charges")
        .show(ui, |plot_ui| {
            for category in &categories {
                let series: PlotPoints = points
                    .iter()
                    .filter(|p| &p.category == category)
                    .map(|p| [p.bmi, p.charges])
                    .collect();
                plot_ui.points(
                    Points::new(series)
                        .radius(4.0)
                        .color(color::point_color(category).gamma_multiply(0.6))
                        .name(category_label(category)),
                );
            }
            if !unmapped.is_empty() {
                let fill = unmapped[0].color.gamma_multiply(0.6);
                let series: PlotPoints = unmapped.iter().map(|p| [p.bmi, p.charges]).collect();
                plot_ui.points(Points::new(series).radius(4.0).color(fill).name("other"));
            }
        });
}

pub fn bar_plot(
    ui: &mut Ui,
    averages: &[RegionAverage],
    colors: &RegionColors,
    size: Option<PlotSize>,
) {
    if averages.is_empty() {
        placeholder(ui, "No records match the current filters", size);
        return;
    }

    sized(Plot::new("bar_plot"), size)
        .legend(Legend::default())
        .x_axis_label("Region")
        .y_axis_label("Average Charges")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, avg) in averages.iter().enumerate() {
                let color = colors.color_for(&avg.region);
                let bar = Bar::new(i as f64, avg.mean_charges)
                    .name(format!("{} (n = {})", avg.region, avg.count))
                    .fill(color)
                    .width(0.6);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(&avg.region).color(color));
            }
        });
}

/// Outline of one wedge, split into pieces no wider than π/8 so each
/// polygon stays convex.
pub fn wedge_polygons(start: f64, angle: f64) -> Vec<Vec<[f64; 2]>> {
    let pieces = (angle / FRAC_PI_8).ceil().max(1.0) as usize;
    let step = angle / pieces as f64;
    (0..pieces)
        .map(|i| {
            let a0 = start + step * i as f64;
            let a1 = a0 + step;
            let mut outline = vec![[0.0, 0.0]];
            for k in 0..=4 {
                let a = a0 + (a1 - a0) * k as f64 / 4.0;
                outline.push([a.cos(), a.sin()]);
            }
            outline
        })
        .collect()
}

pub fn pie_plot(ui: &mut Ui, shares: &[RegionShare], colors: &RegionColors, size: Option<PlotSize>) {
    sized(Plot::new("pie_plot"), size)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // Start at twelve o'clock and go counter-clockwise.
            let mut start = FRAC_PI_2;
            for share in shares {
                let color = colors.color_for(&share.region);
                let name = format!("{} ({:.0})", share.region, share.total_charges);
                for outline in wedge_polygons(start, share.angle) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(outline))
                            .fill_color(color)
                            .stroke(egui::Stroke::new(1.0, Color32::WHITE))
                            .name(&name),
                    );
                }

                let mid = start + share.angle / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    format!("{:.1}%", share.fraction() * 100.0),
                ));
                start += share.angle;
            }
        });
}
