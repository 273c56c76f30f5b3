//! Renderable font handles.

/// Identifies a glyph atlas uploaded by the font loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct GlyphAtlasId(pub u64);

/// Vertical metrics of a loaded font at one pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_height: f32,
}

/// A renderable font at one (path, pixel size) combination.
///
/// Immutable after creation; shared via `Arc` from the cache. The fallback
/// handle carries no atlas and draws nothing, which lets missing fonts
/// degrade instead of crashing the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FontHandle {
    /// Glyph atlas to sample, `None` for the fallback handle.
    pub atlas: Option<GlyphAtlasId>,
    pub metrics: FontMetrics,
    pub size_px: u32,
}

impl FontHandle {
    /// Create a handle backed by a glyph atlas.
    pub fn new(atlas: GlyphAtlasId, metrics: FontMetrics, size_px: u32) -> Self {
        FontHandle {
            atlas: Some(atlas),
            metrics,
            size_px,
        }
    }

    /// The "no text" handle returned when loading fails.
    pub fn fallback(size_px: u32) -> Self {
        FontHandle {
            atlas: None,
            metrics: FontMetrics::default(),
            size_px,
        }
    }

    /// Whether this is the fallback handle.
    pub fn is_fallback(&self) -> bool {
        self.atlas.is_none()
    }
}
