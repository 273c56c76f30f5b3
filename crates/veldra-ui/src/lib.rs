//! Widget logic for the Veldra overlay pass.
//!
//! Widgets here are pure value-to-geometry mappings: state and style are
//! externally owned and passed in, the output is draw regions. The overlay
//! pass guarantees (2D state, default target) come from
//! [`FrameCoordinator`](veldra_gpu::FrameCoordinator); text comes from the
//! `veldra-text` font cache.

pub mod slider;
pub mod style;

pub use slider::{SliderGeometry, SliderState, slider_geometry};
pub use style::SliderStyle;
