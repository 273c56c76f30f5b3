//! Slider value model and draw geometry.
//!
//! Everything here is pure computation over externally owned state and
//! style, so sliders render deterministically and test without a GPU
//! context. The overlay pass turns the returned regions into draw calls.

use glam::Vec2;
use veldra_core::Rect;

use crate::style::SliderStyle;

/// A slider's value model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderState {
    pub fn new(value: f32, min: f32, max: f32, step: f32) -> Self {
        SliderState {
            value,
            min,
            max,
            step,
        }
    }

    /// Normalized [0, 1] position of the value between min and max.
    ///
    /// Always in range even if the value is transiently outside the bounds
    /// during dragging; a degenerate range (max <= min) maps to 0.
    pub fn fill_ratio(&self) -> f32 {
        let range = self.max - self.min;
        if range <= 0.0 {
            return 0.0;
        }
        ((self.value - self.min) / range).clamp(0.0, 1.0)
    }

    /// Set the value, snapping to the step grid and clamping to the bounds.
    pub fn set_value(&mut self, value: f32) {
        let snapped = if self.step > 0.0 {
            self.min + ((value - self.min) / self.step).round() * self.step
        } else {
            value
        };
        self.value = snapped.clamp(self.min, self.max);
    }

    /// The value corresponding to a horizontal position within `track`,
    /// snapped and clamped. Used when dragging the handle.
    pub fn value_at(&self, track: Rect, x: f32) -> f32 {
        if track.width <= 0.0 {
            return self.min;
        }
        let ratio = ((x - track.x) / track.width).clamp(0.0, 1.0);
        let mut state = *self;
        state.set_value(self.min + ratio * (self.max - self.min));
        state.value
    }
}

/// Draw regions for one slider, derived from state + style + bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderGeometry {
    /// Filled part of the track, in the style's fill color.
    pub fill: Rect,
    /// Unfilled remainder of the track, in the style's track color.
    pub remainder: Rect,
    pub handle_center: Vec2,
    pub handle_radius: f32,
}

/// Compute the draw regions for a slider laid out within `bounds`.
///
/// The track spans the full width of `bounds`, vertically centered; the fill
/// width is the track width times the fill ratio, and the handle sits at the
/// fill's right edge.
pub fn slider_geometry(state: &SliderState, style: &SliderStyle, bounds: Rect) -> SliderGeometry {
    let ratio = state.fill_ratio();
    let track_y = bounds.y + (bounds.height - style.track_height) * 0.5;
    let fill_width = bounds.width * ratio;

    SliderGeometry {
        fill: Rect::new(bounds.x, track_y, fill_width, style.track_height),
        remainder: Rect::new(
            bounds.x + fill_width,
            track_y,
            bounds.width - fill_width,
            style.track_height,
        ),
        handle_center: Vec2::new(bounds.x + fill_width, bounds.y + bounds.height * 0.5),
        handle_radius: style.handle_radius,
    }
}
