use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{
    vec2, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2,
};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::SeriesColors;
use crate::figures::{PieFigure, ScatterFigure};

const PIE_SIZE: f32 = 320.0;
const SCATTER_HEIGHT: f32 = 380.0;

fn chart_title(ui: &mut Ui, title: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(title).size(17.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Convex pieces of a circular sector, each spanning at most a quarter turn.
fn sector_shapes(center: Pos2, radius: f32, start: f32, sweep: f32, fill: Color32) -> Vec<Shape> {
    const ARC_STEPS: usize = 16;
    // The epsilon keeps a full turn at four pieces despite f32 rounding.
    let pieces = (sweep / FRAC_PI_2 - 1e-4).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f32;

    (0..pieces)
        .map(|p| {
            let a0 = start + p as f32 * piece_sweep;
            let mut points = Vec::with_capacity(ARC_STEPS + 2);
            points.push(center);
            points.extend((0..=ARC_STEPS).map(|s| {
                let a = a0 + piece_sweep * s as f32 / ARC_STEPS as f32;
                center + Vec2::angled(a) * radius
            }));
            Shape::convex_polygon(points, fill, Stroke::NONE)
        })
        .collect()
}

/// Render the success pie chart with a legend on its right.
pub fn pie_chart(ui: &mut Ui, figure: &PieFigure) {
    chart_title(ui, &figure.title);

    let total = figure.total();
    let colors = SeriesColors::new(figure.slices.iter().map(|s| s.label.as_str()));

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(PIE_SIZE), Sense::hover());
        let center = response.rect.center();
        let radius = PIE_SIZE * 0.45;

        if total == 0 {
            painter.circle_stroke(center, radius, Stroke::new(1.0, ui.visuals().weak_text_color()));
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "No data",
                FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        // Clockwise from twelve o'clock.
        let mut start = -FRAC_PI_2;
        for slice in &figure.slices {
            let share = slice.value as f32 / total as f32;
            let sweep = share * TAU;
            painter.extend(sector_shapes(
                center,
                radius,
                start,
                sweep,
                colors.color_for(&slice.label),
            ));
            if figure.slices.len() > 1 {
                painter.line_segment(
                    [center, center + Vec2::angled(start) * radius],
                    Stroke::new(1.5, Color32::WHITE),
                );
            }
            painter.text(
                center + Vec2::angled(start + sweep / 2.0) * radius * 0.62,
                Align2::CENTER_CENTER,
                format!("{:.1}%", share * 100.0),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            ui.add_space(12.0);
            ui.strong(figure.names_label.as_str());
            for slice in &figure.slices {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, 2.0, colors.color_for(&slice.label));
                    ui.label(format!("{}  ({})", slice.label, slice.value));
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render the payload / outcome scatter chart.
pub fn scatter_chart(ui: &mut Ui, figure: &ScatterFigure) {
    chart_title(ui, &figure.title);

    let colors = SeriesColors::new(figure.traces.iter().map(|t| t.name.as_str()));

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .height(SCATTER_HEIGHT)
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .include_y(-0.2)
        .include_y(1.2)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for trace in &figure.traces {
                let points = Points::new(PlotPoints::from(trace.points.clone()))
                    .name(&trace.name)
                    .color(colors.color_for(&trace.name))
                    .filled(true)
                    .radius(4.5);
                plot_ui.points(points);
            }
        });

    ui.label(
        RichText::new(format!("colour: {}", figure.color_label))
            .small()
            .weak(),
    );
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    fn vertex_count(shapes: &[Shape]) -> usize {
        shapes
            .iter()
            .map(|s| match s {
                Shape::Path(path) => path.points.len(),
                _ => 0,
            })
            .sum()
    }

    #[test]
    fn full_circle_is_split_into_convex_quarters() {
        let shapes = sector_shapes(pos2(0.0, 0.0), 10.0, 0.0, TAU, Color32::RED);
        assert_eq!(shapes.len(), 4);
        assert_eq!(vertex_count(&shapes), 4 * 18);
    }

    #[test]
    fn small_sector_is_one_piece_on_the_circle() {
        let shapes = sector_shapes(pos2(5.0, 5.0), 10.0, 0.0, 0.3, Color32::RED);
        assert_eq!(shapes.len(), 1);
        let Shape::Path(path) = &shapes[0] else {
            panic!("expected a path shape");
        };
        assert_eq!(path.points[0], pos2(5.0, 5.0));
        for p in &path.points[1..] {
            assert!(((*p - pos2(5.0, 5.0)).length() - 10.0).abs() < 1e-3);
        }
    }
}
