//! Applying a graphics configuration without corrupting shared GPU state.

use std::sync::Arc;

use veldra_core::{ConfigError, GraphicsConfig};

use crate::api::GpuApi;
use crate::error::SettingsError;
use crate::shadow::ShadowMapManager;
use crate::types::{Capability, FramebufferId};

/// A cache holding resources tied to the GPU context.
///
/// Registered caches are invalidated wholesale on every settings apply:
/// reloads are cheap, stale handles referencing a torn-down context are not.
/// Settings that affect caching register their cache once instead of
/// scattering manual clears across call sites.
pub trait ContextCache: Send + Sync {
    fn invalidate(&self);
}

/// Orchestrates applying a new [`GraphicsConfig`].
///
/// Validation happens before any GPU mutation (all-or-nothing for bad
/// values), and `apply` never returns with a non-default framebuffer bound:
/// the UI layer renders 2D immediately afterwards and must be able to trust
/// the binding.
pub struct SettingsApplier {
    active: GraphicsConfig,
    caches: Vec<Arc<dyn ContextCache>>,
}

impl SettingsApplier {
    pub fn new(initial: GraphicsConfig) -> Self {
        SettingsApplier {
            active: initial,
            caches: Vec::new(),
        }
    }

    /// The configuration currently in effect.
    pub fn active(&self) -> &GraphicsConfig {
        &self.active
    }

    /// Register a cache to invalidate on every apply.
    pub fn register_cache(&mut self, cache: Arc<dyn ContextCache>) {
        self.caches.push(cache);
    }

    /// Apply `config`, reallocating shadow targets and invalidating caches.
    ///
    /// On a validation error nothing changes. On a shadow allocation error
    /// every other field of `config` still lands, shadows keep the previous
    /// resolution, and the error is returned after the default target has
    /// been rebound and caches invalidated.
    pub fn apply(
        &mut self,
        gpu: &dyn GpuApi,
        shadows: &mut ShadowMapManager,
        config: GraphicsConfig,
    ) -> Result<(), SettingsError> {
        config.validate()?;

        let caps = gpu.capabilities();
        if config.shadow_resolution > caps.max_framebuffer_size {
            return Err(ConfigError::ExceedsDeviceLimit {
                what: "shadow resolution",
                requested: config.shadow_resolution,
                limit: caps.max_framebuffer_size,
            }
            .into());
        }
        if !caps.msaa.supports(config.antialiasing_samples) {
            return Err(ConfigError::UnsupportedSampleCount {
                requested: config.antialiasing_samples,
            }
            .into());
        }

        gpu.set_enabled(Capability::CullFace, config.cull_face_enabled);
        // The AA sample count needs no immediate GPU call; storing it in the
        // active config is what feeds the next frame's pass setup.

        let mut applied = config;
        let mut result = Ok(());
        if config.shadow_enabled {
            if let Err(err) = shadows.ensure_resolution(gpu, config.shadow_resolution) {
                tracing::warn!(
                    resolution = config.shadow_resolution,
                    %err,
                    "shadow reallocation failed, keeping previous shadow target"
                );
                applied.shadow_resolution = self.active.shadow_resolution;
                result = Err(SettingsError::ShadowAllocation {
                    resolution: config.shadow_resolution,
                    source: err,
                });
            }
        } else {
            shadows.release(gpu);
        }

        // Shadow (re)allocation may have happened or failed; either way the
        // caller renders 2D next and expects the screen target back.
        gpu.bind_framebuffer(FramebufferId::DEFAULT).ok();
        gpu.set_viewport(gpu.surface_viewport());

        for cache in &self.caches {
            cache.invalidate();
        }

        tracing::info!(?applied, "graphics settings applied");
        self.active = applied;
        result
    }
}
