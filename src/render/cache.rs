use crate::io::catalog::{Module, TileCatalog};
use crate::wave::module::ModuleId;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Renderable form of a module image
///
/// Scaled copies are produced on first request for a size and kept for the
/// life of the texture.
#[derive(Debug)]
pub struct Texture {
    source: RgbaImage,
    scaled: Mutex<HashMap<(u32, u32), Arc<RgbaImage>>>,
}

impl Texture {
    /// Wrap a converted image
    pub fn new(source: RgbaImage) -> Self {
        Self {
            source,
            scaled: Mutex::new(HashMap::new()),
        }
    }

    /// Full-resolution pixels
    pub const fn source(&self) -> &RgbaImage {
        &self.source
    }

    /// Copy resized to exactly `width × height`; `None` for an empty size
    pub fn scaled(&self, width: u32, height: u32) -> Option<Arc<RgbaImage>> {
        if width == 0 || height == 0 {
            return None;
        }

        let mut scaled = self.scaled.lock().unwrap_or_else(PoisonError::into_inner);
        let image = scaled.entry((width, height)).or_insert_with(|| {
            Arc::new(imageops::resize(
                &self.source,
                width,
                height,
                FilterType::Triangle,
            ))
        });
        Some(Arc::clone(image))
    }
}

/// Cache effectiveness counters
#[derive(Default, Debug)]
pub struct CacheStats {
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl CacheStats {
    /// Lookups answered from the cache
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that performed a conversion
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

/// Memoized module-to-texture conversion keyed by module identity
///
/// Readers share a read lock. A miss takes the write lock and checks again
/// before converting, so each identity is converted exactly once even when
/// two threads miss at the same time.
#[derive(Default, Debug)]
pub struct ImageCache {
    textures: RwLock<HashMap<ModuleId, Arc<Texture>>>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

impl ImageCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for a catalog handle; `None` if the catalog has no such module
    pub fn texture(&self, catalog: &TileCatalog, id: ModuleId) -> Option<Arc<Texture>> {
        self.texture_for(catalog.get(id))
    }

    /// Texture for an optional module; an absent module has no image
    pub fn texture_for(&self, module: Option<&Module>) -> Option<Arc<Texture>> {
        let module = module?;

        {
            let textures = self.textures.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(texture) = textures.get(&module.id()) {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                return Some(Arc::clone(texture));
            }
        }

        let mut textures = self.textures.write().unwrap_or_else(PoisonError::into_inner);
        match textures.entry(module.id()) {
            Entry::Occupied(entry) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                let texture = Arc::new(Texture::new(module.image().clone()));
                Some(Arc::clone(entry.insert(texture)))
            }
        }
    }

    /// Number of converted modules
    pub fn len(&self) -> usize {
        self.textures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True before the first conversion
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
