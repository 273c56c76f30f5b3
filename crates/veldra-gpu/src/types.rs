//! Handle and state value types shared across the GPU layer.

/// Identifies a framebuffer owned by the device.
///
/// The default (on-screen) framebuffer is id 0 and always exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct FramebufferId(pub u64);

impl FramebufferId {
    /// The on-screen framebuffer presented each frame.
    pub const DEFAULT: Self = Self(0);

    pub const fn is_default(&self) -> bool {
        self.0 == 0
    }
}

impl Default for FramebufferId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Identifies a texture owned by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TextureId(pub u64);

/// The rectangular region of the target that rendering maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Viewport {
            x,
            y,
            width,
            height,
        }
    }

    /// A viewport covering a square target of the given edge length.
    pub const fn square(size: u32) -> Self {
        Viewport::new(0, 0, size, size)
    }
}

/// Pipeline state toggles tracked by the state scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    DepthTest,
    Blend,
    CullFace,
}

/// Source/destination factors for the blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    DstColor,
}

/// A source/destination blend factor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendFunc {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl BlendFunc {
    pub const fn new(src: BlendFactor, dst: BlendFactor) -> Self {
        BlendFunc { src, dst }
    }
}

impl Default for BlendFunc {
    /// The GL initial blend function.
    fn default() -> Self {
        BlendFunc::new(BlendFactor::One, BlendFactor::Zero)
    }
}

/// Describes a framebuffer to allocate.
#[derive(Debug, Clone, Copy)]
pub struct FramebufferDesc {
    pub width: u32,
    pub height: u32,
    /// Attach a depth texture. Depth-only targets (shadow maps) skip the
    /// color attachment entirely.
    pub with_depth: bool,
    pub label: &'static str,
}

/// Handles produced by a successful framebuffer allocation.
#[derive(Debug, Clone, Copy)]
pub struct FramebufferAllocation {
    pub framebuffer: FramebufferId,
    pub depth_texture: Option<TextureId>,
}
