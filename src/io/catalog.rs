//! Tile catalog loading from directory-like asset stores

use crate::io::error::{Result, VisualizerError};
use crate::wave::module::ModuleId;
use image::{ImageFormat, RgbaImage};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Read-only source of named image byte streams
pub trait AssetStore {
    /// Names of every entry in the store
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be listed
    fn names(&self) -> Result<Vec<String>>;

    /// Raw bytes of one entry
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be read
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Human-readable location of an entry for error messages
    fn locate(&self, name: &str) -> PathBuf {
        PathBuf::from(name)
    }
}

/// Asset store backed by one filesystem directory (not recursive)
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Serve files from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory being served
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetStore for DirStore {
    fn names(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| VisualizerError::FileSystem {
            path: self.root.clone(),
            operation: "read directory",
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| VisualizerError::FileSystem {
                path: self.root.clone(),
                operation: "read directory entry",
                source: e,
            })?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.locate(name);
        std::fs::read(&path).map_err(|e| VisualizerError::FileSystem {
            path,
            operation: "read file",
            source: e,
        })
    }

    fn locate(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// In-memory asset store, handy for embedding tiles in the binary
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(name.into(), bytes);
    }
}

impl AssetStore for MemoryStore {
    fn names(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| VisualizerError::FileSystem {
                path: PathBuf::from(name),
                operation: "read entry",
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such asset"),
            })
    }
}

/// An atomic placeable unit: an identity plus its decoded image
#[derive(Debug, Clone)]
pub struct Module {
    id: ModuleId,
    name: String,
    image: RgbaImage,
}

impl Module {
    /// Identity handle of this module
    pub const fn id(&self) -> ModuleId {
        self.id
    }

    /// Asset name the module was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoded source image
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Ordered, identity-stable set of modules
///
/// Load order is the sorted asset name order, so the same store always yields
/// the same `ModuleId` for the same tile.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    modules: Vec<Module>,
}

impl TileCatalog {
    /// Decode every recognized image in a store
    ///
    /// # Errors
    ///
    /// Any listing, read or decode failure is returned as-is; a store without
    /// a single recognized image is rejected. No partial catalog is produced.
    pub fn load(store: &dyn AssetStore) -> Result<Self> {
        let mut names: Vec<(String, ImageFormat)> = store
            .names()?
            .into_iter()
            .filter_map(|name| recognized_format(&name).map(|format| (name, format)))
            .collect();
        names.sort_by(|a, b| a.0.cmp(&b.0));

        let mut images = Vec::with_capacity(names.len());
        for (name, format) in names {
            let bytes = store.read(&name)?;
            let image = image::load_from_memory_with_format(&bytes, format).map_err(|e| {
                VisualizerError::ImageLoad {
                    path: store.locate(&name),
                    source: e,
                }
            })?;
            images.push((name, image.to_rgba8()));
        }

        Self::from_images(images)
    }

    /// Load every recognized image in a filesystem directory
    ///
    /// # Errors
    ///
    /// See [`TileCatalog::load`]
    pub fn from_dir(path: impl Into<PathBuf>) -> Result<Self> {
        Self::load(&DirStore::new(path))
    }

    /// Build a catalog from already decoded images, keeping their order
    ///
    /// # Errors
    ///
    /// Returns an error if `images` is empty
    pub fn from_images(images: Vec<(String, RgbaImage)>) -> Result<Self> {
        if images.is_empty() {
            return Err(VisualizerError::InvalidSourceData {
                reason: "no tile images found".to_string(),
            });
        }

        let modules = images
            .into_iter()
            .enumerate()
            .map(|(index, (name, image))| Module {
                id: ModuleId::new(index),
                name,
                image,
            })
            .collect();
        Ok(Self { modules })
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Always false for a successfully loaded catalog
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// All modules in identity order
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Module behind a handle
    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.index())
    }

    /// Handle of the module loaded from `name`
    pub fn find(&self, name: &str) -> Option<ModuleId> {
        self.modules
            .iter()
            .find(|module| module.name == name)
            .map(Module::id)
    }
}

fn recognized_format(name: &str) -> Option<ImageFormat> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
}
