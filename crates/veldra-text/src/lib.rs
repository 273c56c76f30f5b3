//! Font caching for the Veldra renderer.
//!
//! Font parsing and rasterization live behind the [`FontLoader`] trait; this
//! crate owns the (path, size) → [`FontHandle`] cache and its invalidation
//! protocol. The cache implements
//! [`ContextCache`](veldra_gpu::ContextCache) so a settings apply clears it
//! exactly once, instead of manual clears scattered across call sites.

pub mod cache;
pub mod error;
pub mod font;
pub mod loader;

pub use cache::FontCache;
pub use error::FontLoadError;
pub use font::{FontHandle, FontMetrics, GlyphAtlasId};
pub use loader::FontLoader;
