//! Process-wide font cache with explicit invalidation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;
use veldra_gpu::ContextCache;

use crate::font::FontHandle;
use crate::loader::FontLoader;

/// Key for cached font handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FontKey {
    path: PathBuf,
    size_px: u32,
}

#[derive(Default)]
struct CacheInner {
    entries: AHashMap<FontKey, Arc<FontHandle>>,
    hits: u64,
    misses: u64,
}

/// Cache mapping (font path, pixel size) to loaded font handles.
///
/// Lazily populated through the [`FontLoader`] collaborator and invalidated
/// wholesale when a settings apply tears down the rendering context; stale
/// handles could reference resources of the old context, so correctness wins
/// over hit rate. Reads within a frame take `&self`; the cache registers
/// itself once with the settings applier via the [`ContextCache`] impl.
pub struct FontCache {
    loader: Arc<dyn FontLoader>,
    inner: Mutex<CacheInner>,
}

impl FontCache {
    pub fn new(loader: Arc<dyn FontLoader>) -> Self {
        FontCache {
            loader,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Return the cached handle or load it through the collaborator.
    ///
    /// A failed load logs a warning and returns the fallback "no text"
    /// handle without caching it, so a later call retries the loader. Other
    /// cache entries are unaffected by a failure.
    pub fn get_or_load(&self, path: &Path, size_px: u32) -> Arc<FontHandle> {
        let key = FontKey {
            path: path.to_path_buf(),
            size_px,
        };

        {
            let mut inner = self.inner.lock();
            if let Some(handle) = inner.entries.get(&key) {
                let handle = handle.clone();
                inner.hits += 1;
                return handle;
            }
            inner.misses += 1;
        }

        // The load may hit the disk; done outside the lock so a slow first
        // use never blocks other readers.
        match self.loader.load(path, size_px) {
            Ok(handle) => {
                let handle = Arc::new(handle);
                self.inner.lock().entries.insert(key, handle.clone());
                handle
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), size_px, %err, "font load failed, using fallback");
                Arc::new(FontHandle::fallback(size_px))
            }
        }
    }

    /// Drop every cached handle, forcing fresh loads on next use.
    pub fn invalidate_all(&self) {
        let mut inner = self.inner.lock();
        let dropped = inner.entries.len();
        inner.entries.clear();
        tracing::debug!(dropped, "font cache invalidated");
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// (hits, misses) counters for monitoring cache effectiveness.
    pub fn stats(&self) -> (u64, u64) {
        let inner = self.inner.lock();
        (inner.hits, inner.misses)
    }
}

impl ContextCache for FontCache {
    fn invalidate(&self) {
        self.invalidate_all();
    }
}
