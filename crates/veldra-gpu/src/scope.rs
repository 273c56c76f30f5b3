//! Scoped acquisition of pipeline state with guaranteed release.

use crate::api::GpuApi;
use crate::blend::BlendMode;
use crate::error::RenderError;
use crate::snapshot::GpuStateSnapshot;
use crate::types::{Capability, FramebufferId, Viewport};

/// The pipeline state a pass declares it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassState {
    pub depth_test: bool,
    /// `None` disables blending entirely.
    pub blend: Option<BlendMode>,
    pub cull_face: bool,
    /// Bind this target on configure; `None` keeps the current binding.
    pub target: Option<FramebufferId>,
    /// Set this viewport on configure; `None` keeps the current viewport.
    pub viewport: Option<Viewport>,
}

impl PassState {
    /// Depth-tested, optionally culled, no blending: the 3D scene pass.
    pub fn scene_3d(cull_face: bool) -> Self {
        PassState {
            depth_test: true,
            blend: None,
            cull_face,
            target: None,
            viewport: None,
        }
    }

    /// Depth off, standard alpha blending, no culling, screen target: the 2D
    /// overlay pass.
    pub fn overlay_2d() -> Self {
        PassState {
            depth_test: false,
            blend: Some(BlendMode::Alpha),
            cull_face: false,
            target: Some(FramebufferId::DEFAULT),
            viewport: None,
        }
    }

    pub fn with_target(mut self, target: FramebufferId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }
}

/// RAII guard around a render pass.
///
/// Construction captures a [`GpuStateSnapshot`]; dropping the scope restores
/// it unconditionally, on normal completion and on every early-return or
/// error path alike. Whatever the wrapped pass rebinds internally, the state
/// observed after the scope equals the state observed before it.
pub struct StateScope<'a> {
    gpu: &'a dyn GpuApi,
    snapshot: GpuStateSnapshot,
}

impl<'a> StateScope<'a> {
    /// Capture the current pipeline state and open the scope.
    pub fn enter(gpu: &'a dyn GpuApi) -> Self {
        StateScope {
            gpu,
            snapshot: GpuStateSnapshot::capture(gpu),
        }
    }

    /// The state captured at entry.
    pub fn snapshot(&self) -> &GpuStateSnapshot {
        &self.snapshot
    }

    /// Apply the toggles, target, and viewport the pass asked for.
    pub fn configure(&self, state: &PassState) -> Result<(), RenderError> {
        if let Some(target) = state.target {
            self.gpu.bind_framebuffer(target)?;
        }
        if let Some(viewport) = state.viewport {
            self.gpu.set_viewport(viewport);
        }

        self.gpu.set_enabled(Capability::DepthTest, state.depth_test);
        match state.blend {
            Some(mode) => {
                self.gpu.set_enabled(Capability::Blend, true);
                self.gpu.set_blend_func(mode.func());
            }
            None => self.gpu.set_enabled(Capability::Blend, false),
        }
        self.gpu.set_enabled(Capability::CullFace, state.cull_face);
        Ok(())
    }
}

impl Drop for StateScope<'_> {
    fn drop(&mut self) {
        self.snapshot.restore(self.gpu);
    }
}
