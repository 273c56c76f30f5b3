//! Settings application protocol: validate before mutating, reallocate
//! shadows, restore the screen target, invalidate caches.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use veldra_core::{ConfigError, GraphicsConfig};
use veldra_gpu::{
    ContextCache, FramebufferId, GpuApi, GpuCapabilities, SampleCounts, SettingsApplier,
    SettingsError, ShadowMapManager,
};
use veldra_test_utils::{GpuCall, MockGpu};

#[derive(Default)]
struct CountingCache {
    invalidations: AtomicU32,
}

impl CountingCache {
    fn count(&self) -> u32 {
        self.invalidations.load(Ordering::SeqCst)
    }
}

impl ContextCache for CountingCache {
    fn invalidate(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn invalid_config_touches_nothing() {
    let gpu = MockGpu::new(1920, 1080);
    let mut shadows = ShadowMapManager::new();
    let mut applier = SettingsApplier::new(GraphicsConfig::medium());

    let cache = Arc::new(CountingCache::default());
    applier.register_cache(cache.clone());

    let bad = GraphicsConfig {
        shadow_resolution: 3000,
        ..GraphicsConfig::medium()
    };
    let err = applier.apply(&gpu, &mut shadows, bad).unwrap_err();

    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::UnsupportedShadowResolution { requested: 3000 })
    ));
    // Zero GPU calls, no cache churn, active config untouched.
    assert_eq!(gpu.call_count(), 0);
    assert_eq!(cache.count(), 0);
    assert_eq!(*applier.active(), GraphicsConfig::medium());
}

#[test]
fn device_limits_are_enforced_before_mutation() {
    let gpu = MockGpu::new(1920, 1080);
    gpu.set_capabilities(GpuCapabilities {
        max_framebuffer_size: 2048,
        msaa: SampleCounts::X2 | SampleCounts::X4,
    });
    let mut shadows = ShadowMapManager::new();
    let mut applier = SettingsApplier::new(GraphicsConfig::medium());

    let too_big = GraphicsConfig {
        shadow_resolution: 4096,
        ..GraphicsConfig::medium()
    };
    let err = applier.apply(&gpu, &mut shadows, too_big).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::ExceedsDeviceLimit { requested: 4096, limit: 2048, .. })
    ));

    let too_sampled = GraphicsConfig {
        antialiasing_samples: 8,
        ..GraphicsConfig::medium()
    };
    let err = applier.apply(&gpu, &mut shadows, too_sampled).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::UnsupportedSampleCount { requested: 8 })
    ));

    assert_eq!(gpu.call_count(), 0);
    assert_eq!(*applier.active(), GraphicsConfig::medium());
}

#[test]
fn apply_reallocates_shadows_and_restores_screen_target() {
    let gpu = MockGpu::new(1920, 1080);
    let mut shadows = ShadowMapManager::new();
    let mut applier = SettingsApplier::new(GraphicsConfig::medium());

    let cache = Arc::new(CountingCache::default());
    applier.register_cache(cache.clone());

    // Establish the 1024 target the medium preset implies.
    applier
        .apply(&gpu, &mut shadows, GraphicsConfig::medium())
        .unwrap();
    let old = shadows.target().unwrap();
    assert_eq!(old.resolution, 1024);
    gpu.clear_calls();

    applier
        .apply(&gpu, &mut shadows, GraphicsConfig::ultra())
        .unwrap();

    let new = shadows.target().unwrap();
    assert_eq!(new.resolution, 4096);
    assert!(!gpu.framebuffer_exists(old.framebuffer));
    assert!(gpu.framebuffer_exists(new.framebuffer));

    // The screen target and full viewport are always bound on return.
    assert_eq!(gpu.bound_framebuffer(), FramebufferId::DEFAULT);
    assert_eq!(gpu.viewport(), gpu.surface_viewport());

    assert_eq!(cache.count(), 2);
    assert_eq!(*applier.active(), GraphicsConfig::ultra());
}

#[test]
fn disabling_shadows_releases_the_target() {
    let gpu = MockGpu::new(1920, 1080);
    let mut shadows = ShadowMapManager::new();
    let mut applier = SettingsApplier::new(GraphicsConfig::medium());

    applier
        .apply(&gpu, &mut shadows, GraphicsConfig::medium())
        .unwrap();
    assert!(shadows.target().is_some());

    applier
        .apply(&gpu, &mut shadows, GraphicsConfig::low())
        .unwrap();

    assert_eq!(shadows.target(), None);
    assert_eq!(gpu.live_framebuffers(), 0);
    assert_eq!(gpu.bound_framebuffer(), FramebufferId::DEFAULT);
}

#[test]
fn shadow_allocation_failure_degrades_but_commits_the_rest() {
    let gpu = MockGpu::new(1920, 1080);
    let mut shadows = ShadowMapManager::new();
    let mut applier = SettingsApplier::new(GraphicsConfig::medium());

    let cache = Arc::new(CountingCache::default());
    applier.register_cache(cache.clone());

    applier
        .apply(&gpu, &mut shadows, GraphicsConfig::medium())
        .unwrap();
    gpu.fail_next_allocations(1);

    let err = applier
        .apply(&gpu, &mut shadows, GraphicsConfig::ultra())
        .unwrap_err();
    assert!(matches!(
        err,
        SettingsError::ShadowAllocation {
            resolution: 4096,
            ..
        }
    ));

    // Shadows stay at the previous resolution, every other field lands.
    assert_eq!(shadows.resolution(), Some(1024));
    let active = applier.active();
    assert_eq!(active.shadow_resolution, 1024);
    assert_eq!(active.antialiasing_samples, 8);

    // The failure path still restores the screen target and invalidates
    // caches; the UI must be able to render right after.
    assert_eq!(gpu.bound_framebuffer(), FramebufferId::DEFAULT);
    assert_eq!(gpu.viewport(), gpu.surface_viewport());
    assert_eq!(cache.count(), 2);
}

#[test]
fn cull_face_toggle_reaches_the_device() {
    let gpu = MockGpu::new(1920, 1080);
    let mut shadows = ShadowMapManager::new();
    let mut applier = SettingsApplier::new(GraphicsConfig::medium());

    let no_cull = GraphicsConfig {
        cull_face_enabled: false,
        ..GraphicsConfig::medium()
    };
    applier.apply(&gpu, &mut shadows, no_cull).unwrap();

    assert!(gpu.calls().contains(&GpuCall::SetEnabled(
        veldra_gpu::Capability::CullFace,
        false
    )));
}
