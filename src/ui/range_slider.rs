use eframe::egui::{
    pos2, vec2, Align2, Color32, FontId, Response, Sense, Stroke, Ui, Widget,
};

use crate::data::filter::PayloadRange;

// ---------------------------------------------------------------------------
// Slider arithmetic
// ---------------------------------------------------------------------------

/// Mark positions: every `step` from the truncated minimum up to (but not
/// including) the truncated maximum plus one step.
pub fn slider_marks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step.is_nan() || step <= 0.0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let start = min.trunc();
    let end = max.trunc() + step;
    (0..)
        .map(|i| start + i as f64 * step)
        .take_while(|&v| v < end)
        .collect()
}

/// Snap `value` to the step grid anchored at `min`, keeping it in bounds.
/// `max` is always reachable even when it is off the grid.
pub fn snap(value: f64, min: f64, max: f64, step: f64) -> f64 {
    if value >= max {
        return max;
    }
    let snapped = min + ((value - min) / step).round() * step;
    snapped.clamp(min, max)
}

// ---------------------------------------------------------------------------
// Dual-handle range slider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Handle {
    Low,
    High,
}

/// A horizontal slider with a handle for each end of a [`PayloadRange`].
/// Handles may cross; the resulting inverted range is passed on as is.
pub struct RangeSlider<'a> {
    range: &'a mut PayloadRange,
    min: f64,
    max: f64,
    step: f64,
}

impl<'a> RangeSlider<'a> {
    pub fn new(range: &'a mut PayloadRange, min: f64, max: f64, step: f64) -> Self {
        Self {
            range,
            min,
            max,
            step,
        }
    }
}

impl Widget for RangeSlider<'_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        const HEIGHT: f32 = 46.0;
        const PAD: f32 = 10.0;
        const HANDLE_RADIUS: f32 = 7.0;

        let (rect, mut response) =
            ui.allocate_exact_size(vec2(ui.available_width(), HEIGHT), Sense::click_and_drag());

        let left = rect.left() + PAD;
        let right = rect.right() - PAD;
        let track_y = rect.top() + PAD + 2.0;
        let span = (self.max - self.min).max(f64::EPSILON);
        let to_x = |v: f64| left + ((v - self.min) / span).clamp(0.0, 1.0) as f32 * (right - left);
        let to_value =
            |x: f32| self.min + (((x - left) / (right - left)).clamp(0.0, 1.0) as f64) * span;

        // -- interaction --
        let handle_id = response.id.with("active_handle");
        if let Some(pointer) = response.interact_pointer_pos() {
            let stored = ui.data(|d| d.get_temp::<Handle>(handle_id));
            let handle = match stored {
                Some(h) if !response.drag_started() => h,
                _ => {
                    let to_low = (pointer.x - to_x(self.range.low)).abs();
                    let to_high = (pointer.x - to_x(self.range.high)).abs();
                    // Stacked handles: pressing left of them grabs the low end.
                    let h = if to_low < to_high
                        || (to_low == to_high && pointer.x < to_x(self.range.low))
                    {
                        Handle::Low
                    } else {
                        Handle::High
                    };
                    ui.data_mut(|d| d.insert_temp(handle_id, h));
                    h
                }
            };

            let value = snap(to_value(pointer.x), self.min, self.max, self.step);
            let slot = match handle {
                Handle::Low => &mut self.range.low,
                Handle::High => &mut self.range.high,
            };
            if *slot != value {
                *slot = value;
                response.mark_changed();
            }
        }
        if response.drag_stopped() || response.clicked() {
            ui.data_mut(|d| d.remove::<Handle>(handle_id));
        }

        // -- painting --
        let visuals = ui.visuals();
        let painter = ui.painter();
        let track_color = visuals.widgets.inactive.bg_fill;
        let fill_color = visuals.selection.bg_fill;
        let text_color = visuals.weak_text_color();

        painter.line_segment(
            [pos2(left, track_y), pos2(right, track_y)],
            Stroke::new(4.0, track_color),
        );
        let (lo_x, hi_x) = (to_x(self.range.low), to_x(self.range.high));
        painter.line_segment(
            [pos2(lo_x.min(hi_x), track_y), pos2(lo_x.max(hi_x), track_y)],
            Stroke::new(4.0, fill_color),
        );

        for mark in slider_marks(self.min, self.max, self.step) {
            if mark < self.min || mark > self.max {
                continue;
            }
            let x = to_x(mark);
            painter.line_segment(
                [pos2(x, track_y + 4.0), pos2(x, track_y + 8.0)],
                Stroke::new(1.0, text_color),
            );
            painter.text(
                pos2(x, track_y + 10.0),
                Align2::CENTER_TOP,
                format!("{mark:.0}"),
                FontId::proportional(11.0),
                text_color,
            );
        }

        let handle_stroke = Stroke::new(2.0, fill_color);
        for x in [lo_x, hi_x] {
            painter.circle(pos2(x, track_y), HANDLE_RADIUS, Color32::WHITE, handle_stroke);
        }

        response.on_hover_text(format!(
            "{:.0} – {:.0} kg",
            self.range.low, self.range.high
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_run_past_the_maximum_by_one_step_at_most() {
        let marks = slider_marks(0.0, 9600.0, 1000.0);
        let expected: Vec<f64> = (0..=10).map(|i| i as f64 * 1000.0).collect();
        assert_eq!(marks, expected);
    }

    #[test]
    fn marks_start_at_truncated_minimum() {
        assert_eq!(slider_marks(350.7, 2000.0, 1000.0), vec![350.0, 1350.0, 2350.0]);
        assert!(slider_marks(0.0, 100.0, 0.0).is_empty());
    }

    #[test]
    fn snap_anchors_grid_at_minimum_and_reaches_maximum() {
        assert_eq!(snap(1400.0, 0.0, 9600.0, 1000.0), 1000.0);
        assert_eq!(snap(1600.0, 0.0, 9600.0, 1000.0), 2000.0);
        assert_eq!(snap(9550.0, 0.0, 9600.0, 1000.0), 9600.0);
        assert_eq!(snap(9100.0, 0.0, 9600.0, 1000.0), 9000.0);
        assert_eq!(snap(-50.0, 0.0, 9600.0, 1000.0), 0.0);
        assert_eq!(snap(700.0, 200.0, 9600.0, 1000.0), 1200.0);
    }
}
