//! Mock implementation of GpuApi for testing.
//!
//! Records operations and mirrors pipeline state without interacting with a
//! GPU, so scope/coordinator/settings contracts can be asserted directly.

use parking_lot::Mutex;
use veldra_gpu::{
    BlendFunc, Capability, FramebufferAllocation, FramebufferDesc, FramebufferId, GpuApi,
    GpuCapabilities, RenderError, TextureId, Viewport,
};

/// Records a GPU operation call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCall {
    BindFramebuffer(FramebufferId),
    SetViewport(Viewport),
    SetEnabled(Capability, bool),
    SetBlendFunc(BlendFunc),
    CreateFramebuffer {
        width: u32,
        height: u32,
        with_depth: bool,
    },
    DestroyFramebuffer(FramebufferId),
    Present,
}

/// A live mock framebuffer.
#[derive(Debug, Clone)]
struct MockFramebuffer {
    width: u32,
    height: u32,
    with_depth: bool,
}

/// Mirrored pipeline state.
#[derive(Debug, Clone)]
struct MockState {
    bound: FramebufferId,
    viewport: Viewport,
    depth_test: bool,
    blend: bool,
    blend_func: BlendFunc,
    cull_face: bool,
}

/// Mock implementation of [`GpuApi`] for testing.
///
/// Methods take `&self` but record calls, so internal state lives behind
/// `parking_lot::Mutex` (`Send + Sync`, required for `GpuApi` consumers that
/// hold the device across threads).
///
/// Deleting the currently bound framebuffer deliberately leaves the binding
/// stale rather than reverting it, which is exactly the situation the
/// snapshot-restore fallback has to recover from.
///
/// # Example
///
/// ```rust
/// use veldra_gpu::{FramebufferDesc, GpuApi};
/// use veldra_test_utils::MockGpu;
///
/// let mock = MockGpu::new(1920, 1080);
/// let alloc = mock
///     .create_framebuffer(&FramebufferDesc {
///         width: 1024,
///         height: 1024,
///         with_depth: true,
///         label: "shadow map",
///     })
///     .unwrap();
///
/// assert!(mock.framebuffer_exists(alloc.framebuffer));
/// assert_eq!(mock.count_framebuffer_creates(), 1);
/// ```
pub struct MockGpu {
    state: Mutex<MockState>,
    framebuffers: Mutex<Vec<(FramebufferId, MockFramebuffer)>>,
    calls: Mutex<Vec<GpuCall>>,
    next_id: Mutex<u64>,
    /// How many upcoming allocations should fail.
    fail_allocs: Mutex<u32>,
    capabilities: Mutex<GpuCapabilities>,
    surface: Viewport,
}

impl MockGpu {
    /// Create a mock device with the given surface size.
    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        let surface = Viewport::new(0, 0, surface_width, surface_height);
        MockGpu {
            state: Mutex::new(MockState {
                bound: FramebufferId::DEFAULT,
                viewport: surface,
                depth_test: false,
                blend: false,
                blend_func: BlendFunc::default(),
                cull_face: false,
            }),
            framebuffers: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            fail_allocs: Mutex::new(0),
            capabilities: Mutex::new(GpuCapabilities::default()),
            surface,
        }
    }

    /// Make the next `count` allocations fail, simulating GPU memory
    /// exhaustion.
    pub fn fail_next_allocations(&self, count: u32) {
        *self.fail_allocs.lock() = count;
    }

    /// Override the reported device capabilities.
    pub fn set_capabilities(&self, capabilities: GpuCapabilities) {
        *self.capabilities.lock() = capabilities;
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<GpuCall> {
        self.calls.lock().clone()
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Count framebuffer creates.
    pub fn count_framebuffer_creates(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, GpuCall::CreateFramebuffer { .. }))
            .count()
    }

    /// Count framebuffer destroys.
    pub fn count_framebuffer_destroys(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, GpuCall::DestroyFramebuffer(_)))
            .count()
    }

    /// Count presents.
    pub fn count_presents(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, GpuCall::Present))
            .count()
    }

    /// Number of currently live (non-default) framebuffers.
    pub fn live_framebuffers(&self) -> usize {
        self.framebuffers.lock().len()
    }

    /// Size of a live framebuffer, if it exists.
    pub fn framebuffer_size(&self, id: FramebufferId) -> Option<(u32, u32)> {
        self.framebuffers
            .lock()
            .iter()
            .find(|(fb_id, _)| *fb_id == id)
            .map(|(_, fb)| (fb.width, fb.height))
    }

    /// Whether a live framebuffer has a depth attachment.
    pub fn framebuffer_has_depth(&self, id: FramebufferId) -> bool {
        self.framebuffers
            .lock()
            .iter()
            .find(|(fb_id, _)| *fb_id == id)
            .is_some_and(|(_, fb)| fb.with_depth)
    }
}

impl Default for MockGpu {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

impl GpuApi for MockGpu {
    fn capabilities(&self) -> GpuCapabilities {
        *self.capabilities.lock()
    }

    fn surface_viewport(&self) -> Viewport {
        self.surface
    }

    fn bound_framebuffer(&self) -> FramebufferId {
        self.state.lock().bound
    }

    fn bind_framebuffer(&self, id: FramebufferId) -> Result<(), RenderError> {
        if !self.framebuffer_exists(id) {
            return Err(RenderError::MissingFramebuffer(id));
        }
        self.calls.lock().push(GpuCall::BindFramebuffer(id));
        self.state.lock().bound = id;
        Ok(())
    }

    fn framebuffer_exists(&self, id: FramebufferId) -> bool {
        id.is_default() || self.framebuffers.lock().iter().any(|(fb_id, _)| *fb_id == id)
    }

    fn viewport(&self) -> Viewport {
        self.state.lock().viewport
    }

    fn set_viewport(&self, viewport: Viewport) {
        self.calls.lock().push(GpuCall::SetViewport(viewport));
        self.state.lock().viewport = viewport;
    }

    fn is_enabled(&self, capability: Capability) -> bool {
        let state = self.state.lock();
        match capability {
            Capability::DepthTest => state.depth_test,
            Capability::Blend => state.blend,
            Capability::CullFace => state.cull_face,
        }
    }

    fn set_enabled(&self, capability: Capability, enabled: bool) {
        self.calls.lock().push(GpuCall::SetEnabled(capability, enabled));
        let mut state = self.state.lock();
        match capability {
            Capability::DepthTest => state.depth_test = enabled,
            Capability::Blend => state.blend = enabled,
            Capability::CullFace => state.cull_face = enabled,
        }
    }

    fn blend_func(&self) -> BlendFunc {
        self.state.lock().blend_func
    }

    fn set_blend_func(&self, func: BlendFunc) {
        self.calls.lock().push(GpuCall::SetBlendFunc(func));
        self.state.lock().blend_func = func;
    }

    fn create_framebuffer(
        &self,
        desc: &FramebufferDesc,
    ) -> Result<FramebufferAllocation, RenderError> {
        self.calls.lock().push(GpuCall::CreateFramebuffer {
            width: desc.width,
            height: desc.height,
            with_depth: desc.with_depth,
        });

        {
            let mut fail = self.fail_allocs.lock();
            if *fail > 0 {
                *fail -= 1;
                return Err(RenderError::AllocationFailed {
                    what: desc.label,
                    width: desc.width,
                    height: desc.height,
                });
            }
        }

        let id = {
            let mut next = self.next_id.lock();
            let id = FramebufferId(*next);
            *next += 1;
            id
        };
        self.framebuffers.lock().push((
            id,
            MockFramebuffer {
                width: desc.width,
                height: desc.height,
                with_depth: desc.with_depth,
            },
        ));

        Ok(FramebufferAllocation {
            framebuffer: id,
            depth_texture: desc.with_depth.then_some(TextureId(id.0)),
        })
    }

    fn destroy_framebuffer(&self, id: FramebufferId) {
        if id.is_default() {
            return;
        }
        self.calls.lock().push(GpuCall::DestroyFramebuffer(id));
        self.framebuffers.lock().retain(|(fb_id, _)| *fb_id != id);
        // The binding is left stale on purpose; see the type docs.
    }

    fn present(&self) {
        self.calls.lock().push(GpuCall::Present);
    }
}
