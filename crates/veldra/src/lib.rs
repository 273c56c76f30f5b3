//! Veldra - render-state coordination for a single-threaded renderer.
//!
//! Veldra is the layer between a 3D scene pass and a 2D overlay pass sharing
//! one GPU context:
//!
//! - **Scoped state**: every pass runs inside a
//!   [`StateScope`](veldra_gpu::StateScope) that captures and restores the
//!   pipeline state it may disturb.
//! - **Settings application**: [`SettingsApplier`](veldra_gpu::SettingsApplier)
//!   applies a [`GraphicsConfig`](veldra_core::GraphicsConfig) all-or-nothing,
//!   reallocates shadow targets, and invalidates registered caches.
//! - **Font cache**: the `text` feature adds the (path, size) font cache that
//!   reloads after every settings apply.
//! - **Widgets**: the `ui` feature adds pure widget geometry for the overlay
//!   pass.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use veldra::prelude::*;
//!
//! let gpu = /* GlDevice or another GpuApi implementation */;
//! let mut applier = SettingsApplier::new(GraphicsConfig::medium());
//! let mut shadows = ShadowMapManager::new();
//! let mut coordinator = FrameCoordinator::new();
//!
//! let fonts = Arc::new(FontCache::new(loader));
//! applier.register_cache(fonts.clone());
//!
//! loop {
//!     coordinator.run_frame(
//!         &gpu,
//!         &mut applier,
//!         &mut shadows,
//!         |scene| {
//!             if let Some(shadow) = scene.bind_shadow_target()? {
//!                 // render shadow casters into `shadow`
//!             }
//!             // render the scene
//!             Ok(())
//!         },
//!         |overlay| {
//!             // draw UI with `fonts`
//!             Ok(())
//!         },
//!     );
//! }
//! ```

pub use veldra_core as core;
pub use veldra_gpu as gpu;
#[cfg(feature = "text")]
pub use veldra_text as text;
#[cfg(feature = "ui")]
pub use veldra_ui as ui;

pub mod prelude {
    pub use veldra_core::{ConfigError, GraphicsConfig, Rect, TextureFilterQuality};
    pub use veldra_gpu::{
        Color, ContextCache, FrameCoordinator, FramePhase, FramebufferId, GpuApi,
        GpuStateSnapshot, PassState, SettingsApplier, ShadowMapManager, StateScope, Viewport,
    };
    #[cfg(feature = "text")]
    pub use veldra_text::{FontCache, FontHandle, FontLoader};
    #[cfg(feature = "ui")]
    pub use veldra_ui::{SliderState, SliderStyle, slider_geometry};
}
