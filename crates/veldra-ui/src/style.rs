//! Widget style objects.

use veldra_gpu::Color;

/// Visual parameters for a slider.
///
/// One style object per theme, shared by `Arc` across every slider instance;
/// never copied per widget.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderStyle {
    pub track_color: Color,
    pub fill_color: Color,
    pub track_height: f32,
    pub handle_radius: f32,
    pub border_width: f32,
}

impl Default for SliderStyle {
    fn default() -> Self {
        SliderStyle {
            track_color: Color::from_hex(0x3A3A3A),
            fill_color: Color::from_hex(0x4A90D9),
            track_height: 6.0,
            handle_radius: 9.0,
            border_width: 1.0,
        }
    }
}
