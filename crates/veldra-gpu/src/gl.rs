//! OpenGL backend for [`GpuApi`] via glow.
//!
//! # Safety
//!
//! A [`GlDevice`] requires a valid, current OpenGL context on the render
//! thread. All GL calls are `unsafe` at the glow level and are wrapped here
//! behind the safe [`GpuApi`] surface.
//!
//! The device mirrors the pieces of GL state the coordination layer cares
//! about (binding, viewport, toggles, blend func) in a tracked copy, so state
//! queries never hit the driver with `glGet*`.

use std::sync::Arc;

use ahash::AHashMap;
use glow::{HasContext, PixelUnpackData};
use parking_lot::Mutex;

use crate::api::GpuApi;
use crate::capability::{GpuCapabilities, SampleCounts};
use crate::error::RenderError;
use crate::types::{
    BlendFactor, BlendFunc, Capability, FramebufferAllocation, FramebufferDesc, FramebufferId,
    TextureId, Viewport,
};

fn capability_to_gl(capability: Capability) -> u32 {
    match capability {
        Capability::DepthTest => glow::DEPTH_TEST,
        Capability::Blend => glow::BLEND,
        Capability::CullFace => glow::CULL_FACE,
    }
}

fn factor_to_gl(factor: BlendFactor) -> u32 {
    match factor {
        BlendFactor::Zero => glow::ZERO,
        BlendFactor::One => glow::ONE,
        BlendFactor::SrcAlpha => glow::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => glow::ONE_MINUS_SRC_ALPHA,
        BlendFactor::DstAlpha => glow::DST_ALPHA,
        BlendFactor::DstColor => glow::DST_COLOR,
    }
}

/// GL objects backing one allocated framebuffer.
struct GlFramebuffer {
    framebuffer: glow::Framebuffer,
    depth_texture: Option<glow::Texture>,
    color_texture: Option<glow::Texture>,
}

/// Mirror of the global GL state the coordination layer tracks.
struct TrackedState {
    bound: FramebufferId,
    viewport: Viewport,
    depth_test: bool,
    blend: bool,
    blend_func: BlendFunc,
    cull_face: bool,
}

/// A [`GpuApi`] implementation over an OpenGL context.
pub struct GlDevice {
    gl: Arc<glow::Context>,
    state: Mutex<TrackedState>,
    framebuffers: Mutex<AHashMap<FramebufferId, GlFramebuffer>>,
    next_id: Mutex<u64>,
    surface_size: Mutex<(u32, u32)>,
    capabilities: GpuCapabilities,
    /// Swap-buffers callback supplied by the windowing layer.
    on_present: Box<dyn Fn() + Send + Sync>,
}

impl GlDevice {
    /// Wrap a current GL context.
    ///
    /// `on_present` is invoked once per frame from [`GpuApi::present`]; the
    /// windowing layer owns the actual buffer swap.
    pub fn new(
        gl: Arc<glow::Context>,
        surface_width: u32,
        surface_height: u32,
        on_present: Box<dyn Fn() + Send + Sync>,
    ) -> Self {
        let capabilities = unsafe {
            let max_framebuffer_size = gl.get_parameter_i32(glow::MAX_RENDERBUFFER_SIZE) as u32;
            let max_samples = gl.get_parameter_i32(glow::MAX_SAMPLES) as u32;
            let mut msaa = SampleCounts::empty();
            if max_samples >= 2 {
                msaa |= SampleCounts::X2;
            }
            if max_samples >= 4 {
                msaa |= SampleCounts::X4;
            }
            if max_samples >= 8 {
                msaa |= SampleCounts::X8;
            }
            GpuCapabilities {
                max_framebuffer_size,
                msaa,
            }
        };
        tracing::debug!(?capabilities, "created GL device");

        GlDevice {
            gl,
            state: Mutex::new(TrackedState {
                bound: FramebufferId::DEFAULT,
                viewport: Viewport::new(0, 0, surface_width, surface_height),
                depth_test: false,
                blend: false,
                blend_func: BlendFunc::default(),
                cull_face: false,
            }),
            framebuffers: Mutex::new(AHashMap::new()),
            next_id: Mutex::new(1),
            surface_size: Mutex::new((surface_width, surface_height)),
            capabilities,
            on_present,
        }
    }

    /// Tell the device the window surface changed size.
    pub fn resize_surface(&self, width: u32, height: u32) {
        *self.surface_size.lock() = (width, height);
    }

    fn alloc_id(&self) -> u64 {
        let mut next = self.next_id.lock();
        let id = *next;
        *next += 1;
        id
    }

    /// Create a depth texture suitable as a shadow map attachment.
    unsafe fn create_depth_texture(
        &self,
        width: u32,
        height: u32,
    ) -> Result<glow::Texture, String> {
        let gl = &self.gl;
        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::DEPTH_COMPONENT24 as i32,
                width as i32,
                height as i32,
                0,
                glow::DEPTH_COMPONENT,
                glow::UNSIGNED_INT,
                PixelUnpackData::Slice(None),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
            Ok(texture)
        }
    }

    unsafe fn create_color_texture(
        &self,
        width: u32,
        height: u32,
    ) -> Result<glow::Texture, String> {
        let gl = &self.gl;
        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(None),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
            Ok(texture)
        }
    }

    fn gl_framebuffer(&self, id: FramebufferId) -> Option<glow::Framebuffer> {
        self.framebuffers.lock().get(&id).map(|fb| fb.framebuffer)
    }

    /// Allocate and attach everything for one framebuffer.
    ///
    /// Leaves the new framebuffer bound; the caller restores the previous
    /// binding regardless of the outcome.
    unsafe fn build_framebuffer(&self, desc: &FramebufferDesc) -> Result<GlFramebuffer, RenderError> {
        let alloc_err = RenderError::AllocationFailed {
            what: desc.label,
            width: desc.width,
            height: desc.height,
        };
        let gl = &self.gl;

        unsafe {
            let framebuffer = gl.create_framebuffer().map_err(|_| alloc_err.clone())?;
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));

            let depth_texture = if desc.with_depth {
                match self.create_depth_texture(desc.width, desc.height) {
                    Ok(texture) => {
                        gl.framebuffer_texture_2d(
                            glow::FRAMEBUFFER,
                            glow::DEPTH_ATTACHMENT,
                            glow::TEXTURE_2D,
                            Some(texture),
                            0,
                        );
                        Some(texture)
                    }
                    Err(_) => {
                        gl.delete_framebuffer(framebuffer);
                        return Err(alloc_err);
                    }
                }
            } else {
                None
            };

            // Depth-only targets render no color at all.
            let color_texture = if desc.with_depth {
                gl.draw_buffers(&[glow::NONE]);
                gl.read_buffer(glow::NONE);
                None
            } else {
                match self.create_color_texture(desc.width, desc.height) {
                    Ok(texture) => {
                        gl.framebuffer_texture_2d(
                            glow::FRAMEBUFFER,
                            glow::COLOR_ATTACHMENT0,
                            glow::TEXTURE_2D,
                            Some(texture),
                            0,
                        );
                        Some(texture)
                    }
                    Err(_) => {
                        if let Some(texture) = depth_texture {
                            gl.delete_texture(texture);
                        }
                        gl.delete_framebuffer(framebuffer);
                        return Err(alloc_err);
                    }
                }
            };

            if gl.check_framebuffer_status(glow::FRAMEBUFFER) != glow::FRAMEBUFFER_COMPLETE {
                if let Some(texture) = depth_texture {
                    gl.delete_texture(texture);
                }
                if let Some(texture) = color_texture {
                    gl.delete_texture(texture);
                }
                gl.delete_framebuffer(framebuffer);
                return Err(alloc_err);
            }

            Ok(GlFramebuffer {
                framebuffer,
                depth_texture,
                color_texture,
            })
        }
    }
}

impl GpuApi for GlDevice {
    fn capabilities(&self) -> GpuCapabilities {
        self.capabilities
    }

    fn surface_viewport(&self) -> Viewport {
        let (width, height) = *self.surface_size.lock();
        Viewport::new(0, 0, width, height)
    }

    fn bound_framebuffer(&self) -> FramebufferId {
        self.state.lock().bound
    }

    fn bind_framebuffer(&self, id: FramebufferId) -> Result<(), RenderError> {
        if id.is_default() {
            unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, None) };
        } else {
            let framebuffer = self
                .gl_framebuffer(id)
                .ok_or(RenderError::MissingFramebuffer(id))?;
            unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer)) };
        }
        self.state.lock().bound = id;
        Ok(())
    }

    fn framebuffer_exists(&self, id: FramebufferId) -> bool {
        id.is_default() || self.framebuffers.lock().contains_key(&id)
    }

    fn viewport(&self) -> Viewport {
        self.state.lock().viewport
    }

    fn set_viewport(&self, viewport: Viewport) {
        unsafe {
            self.gl.viewport(
                viewport.x,
                viewport.y,
                viewport.width as i32,
                viewport.height as i32,
            );
        }
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
        unsafe {
            if enabled {
                self.gl.enable(capability_to_gl(capability));
            } else {
                self.gl.disable(capability_to_gl(capability));
            }
        }
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
        unsafe {
            self.gl
                .blend_func(factor_to_gl(func.src), factor_to_gl(func.dst));
        }
        self.state.lock().blend_func = func;
    }

    fn create_framebuffer(
        &self,
        desc: &FramebufferDesc,
    ) -> Result<FramebufferAllocation, RenderError> {
        // Setup needs the new framebuffer bound; remember what to put back so
        // allocation never leaks a binding change to the caller.
        let previous = self.bound_framebuffer();
        let result = unsafe { self.build_framebuffer(desc) };
        self.bind_framebuffer(previous).ok();

        let gl_fb = result?;
        let id = FramebufferId(self.alloc_id());
        let depth_texture = gl_fb.depth_texture.map(|_| TextureId(self.alloc_id()));
        self.framebuffers.lock().insert(id, gl_fb);
        tracing::debug!(
            id = id.0,
            width = desc.width,
            height = desc.height,
            label = desc.label,
            "allocated framebuffer"
        );

        Ok(FramebufferAllocation {
            framebuffer: id,
            depth_texture,
        })
    }

    fn destroy_framebuffer(&self, id: FramebufferId) {
        if id.is_default() {
            return;
        }
        let Some(gl_fb) = self.framebuffers.lock().remove(&id) else {
            return;
        };
        unsafe {
            self.gl.delete_framebuffer(gl_fb.framebuffer);
            if let Some(texture) = gl_fb.depth_texture {
                self.gl.delete_texture(texture);
            }
            if let Some(texture) = gl_fb.color_texture {
                self.gl.delete_texture(texture);
            }
        }
        // GL reverts the binding to the default framebuffer when the bound
        // one is deleted; mirror that.
        let mut state = self.state.lock();
        if state.bound == id {
            state.bound = FramebufferId::DEFAULT;
        }
    }

    fn present(&self) {
        (self.on_present)();
    }
}
