//! Frame coordination: pass ordering, state isolation between passes, and
//! frame-boundary settings application.

use veldra_core::GraphicsConfig;
use veldra_gpu::{
    BlendFactor, BlendFunc, Capability, FrameCoordinator, FramePhase, FramebufferId, GpuApi,
    GpuStateSnapshot, RenderError, SettingsApplier, ShadowMapManager, Viewport,
};
use veldra_test_utils::MockGpu;

fn fixture() -> (MockGpu, SettingsApplier, ShadowMapManager, FrameCoordinator) {
    (
        MockGpu::new(1920, 1080),
        SettingsApplier::new(GraphicsConfig::medium()),
        ShadowMapManager::new(),
        FrameCoordinator::new(),
    )
}

#[test]
fn frame_runs_both_passes_and_presents_once() {
    let (gpu, mut applier, mut shadows, mut coordinator) = fixture();
    assert_eq!(coordinator.phase(), FramePhase::Presented);

    let mut scene_ran = false;
    let mut overlay_ran = false;
    let stats = coordinator.run_frame(
        &gpu,
        &mut applier,
        &mut shadows,
        |_| {
            scene_ran = true;
            Ok(())
        },
        |_| {
            overlay_ran = true;
            Ok(())
        },
    );

    assert!(scene_ran);
    assert!(overlay_ran);
    assert_eq!(stats.passes, 2);
    assert_eq!(stats.recovered_errors, 0);
    assert_eq!(coordinator.phase(), FramePhase::Presented);
    assert_eq!(gpu.count_presents(), 1);
}

#[test]
fn scene_pass_gets_depth_and_cull_state() {
    let (gpu, mut applier, mut shadows, mut coordinator) = fixture();

    let mut observed = None;
    coordinator.run_frame(
        &gpu,
        &mut applier,
        &mut shadows,
        |pass| {
            observed = Some((
                pass.gpu().is_enabled(Capability::DepthTest),
                pass.gpu().is_enabled(Capability::Blend),
                pass.gpu().is_enabled(Capability::CullFace),
            ));
            Ok(())
        },
        |_| Ok(()),
    );

    assert_eq!(observed, Some((true, false, true)));
}

#[test]
fn overlay_always_starts_from_canonical_2d_state() {
    let (gpu, mut applier, mut shadows, mut coordinator) = fixture();

    let mut observed = None;
    coordinator.run_frame(
        &gpu,
        &mut applier,
        &mut shadows,
        |pass| {
            // Scene leaves the worst possible residue: shadow target bound,
            // square viewport, blending flipped on with an odd function.
            pass.bind_shadow_target()?;
            pass.gpu().set_enabled(Capability::Blend, true);
            pass.gpu()
                .set_blend_func(BlendFunc::new(BlendFactor::DstColor, BlendFactor::DstAlpha));
            Ok(())
        },
        |pass| {
            observed = Some(GpuStateSnapshot::capture(pass.gpu()));
            Ok(())
        },
    );

    let observed = observed.unwrap();
    assert_eq!(observed.framebuffer, FramebufferId::DEFAULT);
    assert_eq!(observed.viewport, gpu.surface_viewport());
    assert!(!observed.depth_test);
    assert!(observed.blend);
    assert!(!observed.cull_face);
    assert_eq!(
        observed.blend_func,
        BlendFunc::new(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha)
    );
}

#[test]
fn overlay_state_is_canonical_even_when_scene_fails_mid_pass() {
    let (gpu, mut applier, mut shadows, mut coordinator) = fixture();

    let mut observed = None;
    let stats = coordinator.run_frame(
        &gpu,
        &mut applier,
        &mut shadows,
        |pass| {
            pass.bind_shadow_target()?;
            pass.gpu().set_viewport(Viewport::square(17));
            // Simulate a failure after the shadow target is bound.
            Err(RenderError::MissingFramebuffer(FramebufferId(999)))
        },
        |pass| {
            observed = Some((
                pass.gpu().bound_framebuffer(),
                pass.gpu().viewport(),
                pass.gpu().is_enabled(Capability::DepthTest),
            ));
            Ok(())
        },
    );

    assert_eq!(stats.recovered_errors, 1);
    assert_eq!(
        observed,
        Some((FramebufferId::DEFAULT, gpu.surface_viewport(), false))
    );
    // The frame still completed.
    assert_eq!(coordinator.phase(), FramePhase::Presented);
    assert_eq!(gpu.count_presents(), 1);
}

#[test]
fn state_after_frame_equals_state_before_frame() {
    let (gpu, mut applier, mut shadows, mut coordinator) = fixture();
    let before = GpuStateSnapshot::capture(&gpu);

    coordinator.run_frame(
        &gpu,
        &mut applier,
        &mut shadows,
        |pass| {
            pass.bind_shadow_target()?;
            Ok(())
        },
        |_| Ok(()),
    );

    assert_eq!(GpuStateSnapshot::capture(&gpu), before);
}

#[test]
fn queued_settings_apply_before_the_scene_pass() {
    let (gpu, mut applier, mut shadows, mut coordinator) = fixture();

    // One frame at medium to allocate the 1024 target.
    coordinator.run_frame(
        &gpu,
        &mut applier,
        &mut shadows,
        |pass| {
            pass.bind_shadow_target()?;
            Ok(())
        },
        |_| Ok(()),
    );
    assert_eq!(shadows.resolution(), Some(1024));

    coordinator.queue_settings(GraphicsConfig::ultra());

    let mut seen_resolution = None;
    coordinator.run_frame(
        &gpu,
        &mut applier,
        &mut shadows,
        |pass| {
            seen_resolution = Some(pass.config().shadow_resolution);
            let target = pass.bind_shadow_target()?.unwrap();
            assert_eq!(pass.gpu().viewport(), Viewport::square(target.resolution));
            Ok(())
        },
        |_| Ok(()),
    );

    // The scene already saw the new config, never a mid-frame switch.
    assert_eq!(seen_resolution, Some(4096));
    assert_eq!(shadows.resolution(), Some(4096));
    assert_eq!(*applier.active(), GraphicsConfig::ultra());
}

#[test]
fn later_queued_settings_replace_earlier_ones() {
    let (gpu, mut applier, mut shadows, mut coordinator) = fixture();

    coordinator.queue_settings(GraphicsConfig::high());
    coordinator.queue_settings(GraphicsConfig::low());

    coordinator.run_frame(&gpu, &mut applier, &mut shadows, |_| Ok(()), |_| Ok(()));

    assert_eq!(*applier.active(), GraphicsConfig::low());
    // Low disables shadows; the high preset never materialized.
    assert_eq!(shadows.target(), None);
}

#[test]
fn failed_queued_settings_are_recovered_and_dropped() {
    let (gpu, mut applier, mut shadows, mut coordinator) = fixture();

    coordinator.queue_settings(GraphicsConfig {
        shadow_resolution: 3000,
        ..GraphicsConfig::medium()
    });

    let stats = coordinator.run_frame(&gpu, &mut applier, &mut shadows, |_| Ok(()), |_| Ok(()));
    assert_eq!(stats.recovered_errors, 1);
    assert_eq!(*applier.active(), GraphicsConfig::medium());

    // The bad config is not retried on the next frame.
    let stats = coordinator.run_frame(&gpu, &mut applier, &mut shadows, |_| Ok(()), |_| Ok(()));
    assert_eq!(stats.recovered_errors, 0);
}

#[test]
fn shadow_pass_skipped_when_shadows_disabled() {
    let (gpu, mut applier, mut shadows, mut coordinator) = fixture();
    coordinator.queue_settings(GraphicsConfig::low());

    let mut shadow_target = None;
    coordinator.run_frame(
        &gpu,
        &mut applier,
        &mut shadows,
        |pass| {
            shadow_target = Some(pass.bind_shadow_target()?);
            Ok(())
        },
        |_| Ok(()),
    );

    assert_eq!(shadow_target, Some(None));
    assert_eq!(gpu.live_framebuffers(), 0);
}
