//! The per-frame pass state machine.

use veldra_core::GraphicsConfig;

use crate::api::GpuApi;
use crate::error::RenderError;
use crate::scope::{PassState, StateScope};
use crate::settings::SettingsApplier;
use crate::shadow::{ShadowMapManager, ShadowTarget};
use crate::types::Viewport;

/// Where a frame currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Scene3D,
    Overlay2D,
    Presented,
}

impl Default for FramePhase {
    /// Before the first frame, the last phase reached is "presented".
    fn default() -> Self {
        FramePhase::Presented
    }
}

/// Statistics for a rendered frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub passes: usize,
    /// Errors that were logged and recovered instead of aborting the frame.
    pub recovered_errors: usize,
}

/// Context handed to the 3D scene callback.
pub struct ScenePass<'a> {
    gpu: &'a dyn GpuApi,
    shadows: &'a mut ShadowMapManager,
    config: GraphicsConfig,
}

impl ScenePass<'_> {
    pub fn gpu(&self) -> &dyn GpuApi {
        self.gpu
    }

    pub fn config(&self) -> &GraphicsConfig {
        &self.config
    }

    /// Bind the shadow framebuffer for a shadow sub-pass.
    ///
    /// Returns `Ok(None)` when shadows are disabled so the scene can skip the
    /// sub-pass. The binding is deliberately left to the enclosing scope to
    /// undo; the scene keeps drawing into the shadow target until it rebinds
    /// or the pass ends.
    pub fn bind_shadow_target(&mut self) -> Result<Option<ShadowTarget>, RenderError> {
        if !self.config.shadow_enabled {
            return Ok(None);
        }
        let target = self
            .shadows
            .ensure_resolution(self.gpu, self.config.shadow_resolution)?;
        self.gpu.bind_framebuffer(target.framebuffer)?;
        self.gpu.set_viewport(Viewport::square(target.resolution));
        Ok(Some(target))
    }
}

/// Context handed to the 2D overlay callback.
pub struct OverlayPass<'a> {
    gpu: &'a dyn GpuApi,
}

impl OverlayPass<'_> {
    pub fn gpu(&self) -> &dyn GpuApi {
        self.gpu
    }
}

/// Drives one frame: `Scene3D` then `Overlay2D`, each inside its own
/// [`StateScope`], then present.
///
/// The contract this type owns: passes never observe each other's residual
/// state. The overlay always starts from the canonical 2D configuration no
/// matter what the scene pass bound, resized, or failed to finish.
#[derive(Debug, Default)]
pub struct FrameCoordinator {
    phase: FramePhase,
    pending: Option<GraphicsConfig>,
}

impl FrameCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The phase the last `run_frame` call reached.
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Queue a configuration to apply at the next frame boundary.
    ///
    /// This is the safe point for settings changes that originate outside
    /// the render loop: the apply runs at the start of the next frame, before
    /// `Scene3D`, never interleaved mid-pass. A second queued config before
    /// the frame runs replaces the first.
    pub fn queue_settings(&mut self, config: GraphicsConfig) {
        if self.pending.replace(config).is_some() {
            tracing::debug!("replacing previously queued settings");
        }
    }

    /// Run one frame.
    ///
    /// Pass errors are logged and recovered: a best-effort frame beats an
    /// aborted one, and state restoration does not depend on the callbacks
    /// succeeding.
    pub fn run_frame<S, O>(
        &mut self,
        gpu: &dyn GpuApi,
        applier: &mut SettingsApplier,
        shadows: &mut ShadowMapManager,
        scene: S,
        overlay: O,
    ) -> FrameStats
    where
        S: FnOnce(&mut ScenePass<'_>) -> Result<(), RenderError>,
        O: FnOnce(&mut OverlayPass<'_>) -> Result<(), RenderError>,
    {
        let mut stats = FrameStats::default();

        if let Some(config) = self.pending.take() {
            if let Err(err) = applier.apply(gpu, shadows, config) {
                tracing::warn!(%err, "queued settings apply failed");
                stats.recovered_errors += 1;
            }
        }
        let config = *applier.active();

        self.phase = FramePhase::Scene3D;
        {
            let scope = StateScope::enter(gpu);
            match scope.configure(&PassState::scene_3d(config.cull_face_enabled)) {
                Ok(()) => {
                    let mut pass = ScenePass {
                        gpu,
                        shadows,
                        config,
                    };
                    if let Err(err) = scene(&mut pass) {
                        tracing::warn!(%err, "scene pass failed, state restored at scope exit");
                        stats.recovered_errors += 1;
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, "could not configure scene pass");
                    stats.recovered_errors += 1;
                }
            }
            stats.passes += 1;
        }

        self.phase = FramePhase::Overlay2D;
        {
            let scope = StateScope::enter(gpu);
            // Bind the screen target and full viewport explicitly instead of
            // trusting restoration alone.
            let state = PassState::overlay_2d().with_viewport(gpu.surface_viewport());
            match scope.configure(&state) {
                Ok(()) => {
                    let mut pass = OverlayPass { gpu };
                    if let Err(err) = overlay(&mut pass) {
                        tracing::warn!(%err, "overlay pass failed");
                        stats.recovered_errors += 1;
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, "could not configure overlay pass");
                    stats.recovered_errors += 1;
                }
            }
            stats.passes += 1;
        }

        self.phase = FramePhase::Presented;
        gpu.present();
        stats
    }
}
