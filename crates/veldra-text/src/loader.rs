//! The seam to the external font-loading module.

use std::path::Path;

use crate::error::FontLoadError;
use crate::font::FontHandle;

/// Loads and rasterizes a font file at a pixel size.
///
/// Parsing and atlas upload are entirely the implementor's concern; this
/// crate only caches and invalidates the results.
pub trait FontLoader: Send + Sync {
    fn load(&self, path: &Path, size_px: u32) -> Result<FontHandle, FontLoadError>;
}
