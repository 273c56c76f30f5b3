//! Captured pipeline state and its restoration.

use crate::api::GpuApi;
use crate::types::{BlendFunc, Capability, FramebufferId, Viewport};

/// A value snapshot of the pipeline state a pass may disturb.
///
/// Capturing before a pass and restoring after it leaves the global state
/// bit-for-bit equal to before, regardless of what the pass did internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuStateSnapshot {
    pub framebuffer: FramebufferId,
    pub viewport: Viewport,
    pub depth_test: bool,
    pub blend: bool,
    pub blend_func: BlendFunc,
    pub cull_face: bool,
}

impl GpuStateSnapshot {
    /// Read every tracked value from the device.
    pub fn capture(gpu: &dyn GpuApi) -> Self {
        GpuStateSnapshot {
            framebuffer: gpu.bound_framebuffer(),
            viewport: gpu.viewport(),
            depth_test: gpu.is_enabled(Capability::DepthTest),
            blend: gpu.is_enabled(Capability::Blend),
            blend_func: gpu.blend_func(),
            cull_face: gpu.is_enabled(Capability::CullFace),
        }
    }

    /// Write every captured value back to the device.
    ///
    /// If the captured framebuffer was destroyed in the meantime, falls back
    /// to the default target and full-surface viewport and logs a warning.
    /// An invalid target must never stay bound: it silently blackens all
    /// subsequent rendering, including the UI.
    pub fn restore(&self, gpu: &dyn GpuApi) {
        let rebound = gpu.framebuffer_exists(self.framebuffer)
            && gpu.bind_framebuffer(self.framebuffer).is_ok();

        if rebound {
            gpu.set_viewport(self.viewport);
        } else {
            tracing::warn!(
                framebuffer = self.framebuffer.0,
                "captured framebuffer vanished during pass, restoring default target"
            );
            gpu.bind_framebuffer(FramebufferId::DEFAULT).ok();
            gpu.set_viewport(gpu.surface_viewport());
        }

        gpu.set_enabled(Capability::DepthTest, self.depth_test);
        gpu.set_enabled(Capability::Blend, self.blend);
        gpu.set_blend_func(self.blend_func);
        gpu.set_enabled(Capability::CullFace, self.cull_face);
    }
}
