//! Single-slot ownership of the shadow-casting framebuffer.

use crate::api::GpuApi;
use crate::error::RenderError;
use crate::types::{FramebufferDesc, FramebufferId, TextureId};

/// The shadow map render target: a depth-only framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowTarget {
    pub framebuffer: FramebufferId,
    pub depth_texture: TextureId,
    pub resolution: u32,
}

/// Owns the shadow framebuffer and (re)allocates it on resolution changes.
///
/// One slot, swap-and-destroy-old: a resolution change never resizes in
/// place, it allocates the replacement first and destroys the old target
/// before returning, so no two live shadow framebuffers ever coexist past an
/// `ensure_resolution` call. Binding the default framebuffer back is NOT this
/// type's job; callers wrap shadow work in a
/// [`StateScope`](crate::scope::StateScope).
#[derive(Debug, Default)]
pub struct ShadowMapManager {
    slot: Option<ShadowTarget>,
}

impl ShadowMapManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current target, if shadows have been allocated.
    pub fn target(&self) -> Option<ShadowTarget> {
        self.slot
    }

    pub fn resolution(&self) -> Option<u32> {
        self.slot.map(|t| t.resolution)
    }

    /// Make sure a shadow target of exactly `resolution` exists and return it.
    ///
    /// Same resolution: returns the existing target, no reallocation.
    /// Different resolution: allocates the new target, destroys the old one,
    /// swaps. On allocation failure the previous target (if any) stays alive
    /// and usable, so shadows degrade instead of disappearing.
    pub fn ensure_resolution(
        &mut self,
        gpu: &dyn GpuApi,
        resolution: u32,
    ) -> Result<ShadowTarget, RenderError> {
        if let Some(target) = self.slot {
            if target.resolution == resolution {
                return Ok(target);
            }
        }

        let alloc = gpu.create_framebuffer(&FramebufferDesc {
            width: resolution,
            height: resolution,
            with_depth: true,
            label: "shadow map",
        })?;

        let Some(depth_texture) = alloc.depth_texture else {
            gpu.destroy_framebuffer(alloc.framebuffer);
            return Err(RenderError::AllocationFailed {
                what: "shadow depth attachment",
                width: resolution,
                height: resolution,
            });
        };

        if let Some(old) = self.slot.take() {
            tracing::debug!(
                old = old.resolution,
                new = resolution,
                "replacing shadow framebuffer"
            );
            gpu.destroy_framebuffer(old.framebuffer);
        }

        let target = ShadowTarget {
            framebuffer: alloc.framebuffer,
            depth_texture,
            resolution,
        };
        self.slot = Some(target);
        Ok(target)
    }

    /// Destroy the shadow target, if any. Used when shadows are disabled.
    pub fn release(&mut self, gpu: &dyn GpuApi) {
        if let Some(old) = self.slot.take() {
            gpu.destroy_framebuffer(old.framebuffer);
        }
    }
}
