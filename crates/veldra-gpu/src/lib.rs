//! Render-pass state machine with scoped GPU state for Veldra.
//!
//! This crate is the coordination layer between a 3D scene pass and a 2D
//! overlay pass sharing one GPU context. The pieces:
//!
//! - [`GpuApi`] - object-safe seam over the context's global pipeline state
//! - [`GpuStateSnapshot`] / [`StateScope`] - capture-and-restore guards so no
//!   pass ever observes another's residual state
//! - [`ShadowMapManager`] - single-slot owner of the shadow framebuffer
//! - [`SettingsApplier`] - all-or-nothing application of a
//!   [`GraphicsConfig`](veldra_core::GraphicsConfig), with registered cache
//!   invalidation
//! - [`FrameCoordinator`] - the per-frame `Scene3D → Overlay2D → Presented`
//!   state machine
//!
//! Everything is driven by a single render thread; see `MockGpu` in
//! `veldra-test-utils` for GPU-free testing and `gl::GlDevice` (feature
//! `gl`) for the OpenGL backend.

pub mod api;
pub mod blend;
pub mod capability;
pub mod color;
pub mod coordinator;
pub mod error;
#[cfg(feature = "gl")]
pub mod gl;
pub mod scope;
pub mod settings;
pub mod shadow;
pub mod snapshot;
pub mod types;

pub use api::GpuApi;
pub use blend::BlendMode;
pub use capability::{GpuCapabilities, SampleCounts};
pub use color::Color;
pub use coordinator::{FrameCoordinator, FramePhase, FrameStats, OverlayPass, ScenePass};
pub use error::{RenderError, SettingsError};
pub use scope::{PassState, StateScope};
pub use settings::{ContextCache, SettingsApplier};
pub use shadow::{ShadowMapManager, ShadowTarget};
pub use snapshot::GpuStateSnapshot;
pub use types::{
    BlendFactor, BlendFunc, Capability, FramebufferAllocation, FramebufferDesc, FramebufferId,
    TextureId, Viewport,
};
