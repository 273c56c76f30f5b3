//! State scope capture/restore contracts, verified against the mock device.

use veldra_gpu::{
    BlendFactor, BlendFunc, Capability, FramebufferDesc, FramebufferId, GpuApi, GpuStateSnapshot,
    PassState, StateScope, Viewport,
};
use veldra_test_utils::MockGpu;

fn shadow_desc(size: u32) -> FramebufferDesc {
    FramebufferDesc {
        width: size,
        height: size,
        with_depth: true,
        label: "shadow map",
    }
}

#[test]
fn restore_round_trips_arbitrary_mutation() {
    let gpu = MockGpu::new(1920, 1080);
    gpu.set_enabled(Capability::DepthTest, true);
    gpu.set_blend_func(BlendFunc::new(BlendFactor::One, BlendFactor::One));
    let before = GpuStateSnapshot::capture(&gpu);

    {
        let scope = StateScope::enter(&gpu);
        scope
            .configure(&PassState::scene_3d(true))
            .expect("configure scene state");

        // Pass goes wild: offscreen target, shrunken viewport, every toggle
        // flipped.
        let alloc = gpu.create_framebuffer(&shadow_desc(1024)).unwrap();
        gpu.bind_framebuffer(alloc.framebuffer).unwrap();
        gpu.set_viewport(Viewport::square(1024));
        gpu.set_enabled(Capability::DepthTest, false);
        gpu.set_enabled(Capability::Blend, true);
        gpu.set_enabled(Capability::CullFace, true);
        gpu.set_blend_func(BlendFunc::new(
            BlendFactor::DstColor,
            BlendFactor::OneMinusSrcAlpha,
        ));
    }

    assert_eq!(GpuStateSnapshot::capture(&gpu), before);
}

#[test]
fn restore_runs_on_early_exit() {
    let gpu = MockGpu::new(800, 600);
    let before = GpuStateSnapshot::capture(&gpu);

    let failing_pass = || -> Result<(), &'static str> {
        let _scope = StateScope::enter(&gpu);
        gpu.set_enabled(Capability::Blend, true);
        gpu.set_viewport(Viewport::square(64));
        Err("pass aborted")
    };
    assert!(failing_pass().is_err());

    assert_eq!(GpuStateSnapshot::capture(&gpu), before);
}

#[test]
fn nested_scopes_restore_in_order() {
    let gpu = MockGpu::new(800, 600);
    let before = GpuStateSnapshot::capture(&gpu);

    {
        let _outer = StateScope::enter(&gpu);
        gpu.set_enabled(Capability::DepthTest, true);
        {
            let _inner = StateScope::enter(&gpu);
            gpu.set_enabled(Capability::DepthTest, false);
            gpu.set_enabled(Capability::Blend, true);
        }
        // Inner scope undid its own changes.
        assert!(gpu.is_enabled(Capability::DepthTest));
        assert!(!gpu.is_enabled(Capability::Blend));
    }

    assert_eq!(GpuStateSnapshot::capture(&gpu), before);
}

#[test]
fn destroyed_capture_target_falls_back_to_default() {
    let gpu = MockGpu::new(1280, 720);
    let alloc = gpu.create_framebuffer(&shadow_desc(512)).unwrap();
    gpu.bind_framebuffer(alloc.framebuffer).unwrap();
    gpu.set_viewport(Viewport::square(512));

    {
        let _scope = StateScope::enter(&gpu);
        // A settings change tears the captured framebuffer down mid-pass.
        gpu.destroy_framebuffer(alloc.framebuffer);
    }

    // Restoration could not rebind the dead target; it must fall back to
    // the screen rather than leave an invalid binding.
    assert_eq!(gpu.bound_framebuffer(), FramebufferId::DEFAULT);
    assert_eq!(gpu.viewport(), gpu.surface_viewport());
}

#[test]
fn configure_sets_canonical_overlay_state() {
    let gpu = MockGpu::new(800, 600);
    gpu.set_enabled(Capability::DepthTest, true);
    gpu.set_enabled(Capability::CullFace, true);

    let scope = StateScope::enter(&gpu);
    scope
        .configure(&PassState::overlay_2d().with_viewport(gpu.surface_viewport()))
        .expect("configure overlay state");

    assert_eq!(gpu.bound_framebuffer(), FramebufferId::DEFAULT);
    assert_eq!(gpu.viewport(), gpu.surface_viewport());
    assert!(!gpu.is_enabled(Capability::DepthTest));
    assert!(gpu.is_enabled(Capability::Blend));
    assert!(!gpu.is_enabled(Capability::CullFace));
    assert_eq!(
        gpu.blend_func(),
        BlendFunc::new(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha)
    );
}
