//! Unit tests for slider geometry (no GPU required).

use veldra_core::Rect;
use veldra_ui::{SliderState, SliderStyle, slider_geometry};

#[test]
fn fill_ratio_basic() {
    let state = SliderState::new(80.0, 0.0, 100.0, 1.0);
    assert_eq!(state.fill_ratio(), 0.80);
}

#[test]
fn fill_ratio_at_max() {
    let state = SliderState::new(100.0, 0.0, 100.0, 1.0);
    assert_eq!(state.fill_ratio(), 1.0);
}

#[test]
fn fill_ratio_clamps_below_min() {
    let state = SliderState::new(-5.0, 0.0, 100.0, 1.0);
    assert_eq!(state.fill_ratio(), 0.0);
}

#[test]
fn fill_ratio_clamps_above_max() {
    let state = SliderState::new(140.0, 0.0, 100.0, 1.0);
    assert_eq!(state.fill_ratio(), 1.0);
}

#[test]
fn fill_ratio_degenerate_range() {
    let state = SliderState::new(5.0, 10.0, 10.0, 1.0);
    assert_eq!(state.fill_ratio(), 0.0);
}

#[test]
fn geometry_splits_track_by_ratio() {
    let state = SliderState::new(25.0, 0.0, 100.0, 1.0);
    let style = SliderStyle::default();
    let bounds = Rect::new(10.0, 20.0, 200.0, 24.0);

    let geometry = slider_geometry(&state, &style, bounds);

    assert_eq!(geometry.fill.x, 10.0);
    assert_eq!(geometry.fill.width, 50.0);
    assert_eq!(geometry.remainder.x, 60.0);
    assert_eq!(geometry.remainder.width, 150.0);
    // Fill and remainder tile the full track.
    assert_eq!(
        geometry.fill.width + geometry.remainder.width,
        bounds.width
    );
}

#[test]
fn geometry_track_is_vertically_centered() {
    let state = SliderState::new(50.0, 0.0, 100.0, 1.0);
    let style = SliderStyle {
        track_height: 6.0,
        ..SliderStyle::default()
    };
    let bounds = Rect::new(0.0, 0.0, 100.0, 30.0);

    let geometry = slider_geometry(&state, &style, bounds);

    assert_eq!(geometry.fill.y, 12.0);
    assert_eq!(geometry.fill.height, 6.0);
    assert_eq!(geometry.handle_center.y, 15.0);
}

#[test]
fn handle_tracks_fill_edge() {
    let state = SliderState::new(75.0, 0.0, 100.0, 1.0);
    let style = SliderStyle::default();
    let bounds = Rect::new(0.0, 0.0, 400.0, 24.0);

    let geometry = slider_geometry(&state, &style, bounds);

    assert_eq!(geometry.handle_center.x, 300.0);
    assert_eq!(geometry.handle_radius, style.handle_radius);
}

#[test]
fn zero_fill_renders_empty_fill_region() {
    // An invisible fill at value == min was a real rendering bug class;
    // the geometry must stay well-formed (zero width, not negative).
    let state = SliderState::new(0.0, 0.0, 100.0, 1.0);
    let style = SliderStyle::default();
    let bounds = Rect::new(0.0, 0.0, 100.0, 20.0);

    let geometry = slider_geometry(&state, &style, bounds);

    assert_eq!(geometry.fill.width, 0.0);
    assert_eq!(geometry.remainder.width, 100.0);
}
