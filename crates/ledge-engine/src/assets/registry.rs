use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::components::sprite::SpriteHandle;

/// Registry of frame image paths.
/// Hands out one stable handle per path; registering the same path twice
/// returns the original handle.
pub struct SpriteRegistry {
    handles: HashMap<PathBuf, SpriteHandle>,
    paths: Vec<PathBuf>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
            paths: Vec::new(),
        }
    }

    /// Register a path and return its handle.
    pub fn register(&mut self, path: &Path) -> SpriteHandle {
        if let Some(handle) = self.handles.get(path) {
            return *handle;
        }
        let handle = SpriteHandle(self.paths.len() as u32);
        self.paths.push(path.to_path_buf());
        self.handles.insert(path.to_path_buf(), handle);
        handle
    }

    /// Look up a handle by path. Returns None if never registered.
    pub fn get(&self, path: &Path) -> Option<SpriteHandle> {
        self.handles.get(path).copied()
    }

    /// Path a handle was issued for, so the renderer can load the texture.
    pub fn path(&self, handle: SpriteHandle) -> Option<&Path> {
        self.paths.get(handle.0 as usize).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for SpriteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
