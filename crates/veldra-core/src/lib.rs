//! Core utilities for the Veldra renderer.
//!
//! This crate holds the pieces every other Veldra crate needs: the graphics
//! configuration value types and their validation, small geometry helpers,
//! and logging initialization.

pub mod config;
pub mod geometry;
pub mod logging;

pub use config::{ConfigError, GraphicsConfig, TextureFilterQuality};
pub use geometry::{Rect, Size};
