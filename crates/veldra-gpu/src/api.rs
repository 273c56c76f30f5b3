//! The seam between the coordination layer and a concrete GPU backend.

use crate::capability::GpuCapabilities;
use crate::error::RenderError;
use crate::types::{
    BlendFunc, Capability, FramebufferAllocation, FramebufferDesc, FramebufferId, Viewport,
};

/// Object-safe trait over the global pipeline state of a single GPU context.
///
/// Implementations take `&self` and use interior mutability, so the trait can
/// be shared freely within the render thread without lifetime gymnastics.
/// Every piece of state a pass may touch is readable back through this trait;
/// that is what makes snapshot/restore an explicit, testable contract instead
/// of "whatever the driver currently has bound".
///
/// Implementations: `GlDevice` (OpenGL via glow, `gl` feature) and `MockGpu`
/// in `veldra-test-utils` for GPU-free tests.
pub trait GpuApi {
    /// Device limits, queried once at creation.
    fn capabilities(&self) -> GpuCapabilities;

    /// The viewport covering the whole on-screen surface.
    fn surface_viewport(&self) -> Viewport;

    /// The currently bound framebuffer.
    ///
    /// May name a destroyed framebuffer if the bound target was deleted out
    /// from under the binding; check [`framebuffer_exists`](Self::framebuffer_exists).
    fn bound_framebuffer(&self) -> FramebufferId;

    /// Bind a framebuffer as the render target.
    ///
    /// [`FramebufferId::DEFAULT`] always exists and always binds successfully.
    fn bind_framebuffer(&self, id: FramebufferId) -> Result<(), RenderError>;

    /// Whether the id refers to a live framebuffer.
    fn framebuffer_exists(&self, id: FramebufferId) -> bool;

    fn viewport(&self) -> Viewport;

    fn set_viewport(&self, viewport: Viewport);

    fn is_enabled(&self, capability: Capability) -> bool;

    fn set_enabled(&self, capability: Capability, enabled: bool);

    fn blend_func(&self) -> BlendFunc;

    fn set_blend_func(&self, func: BlendFunc);

    /// Allocate a framebuffer with the requested attachments.
    ///
    /// Allocation must not change the current framebuffer binding; restoring
    /// state around setup is the implementation's responsibility.
    fn create_framebuffer(
        &self,
        desc: &FramebufferDesc,
    ) -> Result<FramebufferAllocation, RenderError>;

    /// Destroy a framebuffer and its attachments. Destroying the default
    /// framebuffer is a no-op.
    fn destroy_framebuffer(&self, id: FramebufferId);

    /// Present the default framebuffer. Opaque swap boundary, called once per
    /// frame after the overlay pass completes.
    fn present(&self);
}
