use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::decode,
    foundation::core::Size,
    foundation::error::{SceneError, SceneResult},
};

#[derive(Clone, Debug)]
/// Decoded texture in premultiplied RGBA8 form.
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Texture {
    /// Single-colour texture, used for placeholders and tests.
    pub fn solid(width: u32, height: u32, rgba8_premul: [u8; 4]) -> Self {
        let mut bytes = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            bytes.extend_from_slice(&rgba8_premul);
        }
        Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        }
    }

    /// Natural size in pixels.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Progress snapshot reported after each texture finishes loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
    pub name: String,
}

impl LoadProgress {
    /// Whole percent loaded, truncated.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.loaded * 100) / self.total) as u32
    }
}

/// Textures keyed by the names builders reference them with.
///
/// Loading is front-loaded: builders and renderers only ever read from the store.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    root: PathBuf,
    textures: HashMap<String, Texture>,
}

impl AssetStore {
    /// Empty store rooted at `root`; textures are added with [`AssetStore::load`] or
    /// [`AssetStore::insert`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: HashMap::new(),
        }
    }

    /// Load every named texture from `root`, failing on the first one that cannot be read.
    pub fn preload<I, S>(root: impl Into<PathBuf>, names: I) -> SceneResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::preload_with_progress(root, names, |_| {})
    }

    #[tracing::instrument(skip_all)]
    pub fn preload_with_progress<I, S>(
        root: impl Into<PathBuf>,
        names: I,
        mut on_progress: impl FnMut(&LoadProgress),
    ) -> SceneResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|s| s.as_ref().to_string()).collect();
        let mut store = Self::new(root);
        let total = names.len();
        for (idx, name) in names.iter().enumerate() {
            store.load(name)?;
            let progress = LoadProgress {
                loaded: idx + 1,
                total,
                name: name.clone(),
            };
            tracing::info!(
                texture = %name,
                "Loading: {}%",
                progress.percent()
            );
            on_progress(&progress);
        }
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load one texture relative to the store root. Already-loaded names are kept as is.
    pub fn load(&mut self, name: &str) -> SceneResult<()> {
        if self.textures.contains_key(name) {
            return Ok(());
        }
        let rel = normalize_rel_path(name)?;
        let path = self.root.join(Path::new(&rel));
        let texture = decode::decode_texture_file(&path).map_err(|e| {
            tracing::warn!(texture = %name, error = %e, "texture failed to load");
            SceneError::asset_missing(name)
        })?;
        self.textures.insert(name.to_string(), texture);
        Ok(())
    }

    /// Add (or replace) a texture under `name`.
    pub fn insert(&mut self, name: impl Into<String>, texture: Texture) -> Option<Texture> {
        self.textures.insert(name.into(), texture)
    }

    pub fn get(&self, name: &str) -> SceneResult<&Texture> {
        self.textures
            .get(name)
            .ok_or_else(|| SceneError::asset_missing(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    /// Fail with the first name that is not loaded.
    pub fn require<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> SceneResult<()> {
        for name in names {
            self.get(name)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Normalize a relative texture path (`\` → `/`, no absolute paths, no `..`).
pub fn normalize_rel_path(source: &str) -> SceneResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SceneError::validation("texture paths must be relative"));
    }

    let parts: Vec<&str> = s
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect();
    if parts.contains(&"..") {
        return Err(SceneError::validation("texture paths must not contain '..'"));
    }
    if parts.is_empty() {
        return Err(SceneError::validation(
            "texture path must contain a file name",
        ));
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
