//! Frame-directory scanning for animations.
//!
//! A state's frames are the image files of one directory, ordered by file
//! name. Decoding is the renderer's job; this module only lists and
//! registers paths.

use std::fs;
use std::path::{Path, PathBuf};

use crate::api::error::{EngineError, EngineResult};
use crate::assets::registry::SpriteRegistry;
use crate::components::sprite::SpriteHandle;

const FRAME_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
const SHEET_MARKER: &str = "spritesheet";

/// Produces the ordered frame handles stored in a directory.
pub trait FrameSource {
    fn frames_for(&mut self, dir: &Path) -> EngineResult<Vec<SpriteHandle>>;
}

/// `FrameSource` backed by the local filesystem.
pub struct DirectoryFrames<'a> {
    registry: &'a mut SpriteRegistry,
}

impl<'a> DirectoryFrames<'a> {
    pub fn new(registry: &'a mut SpriteRegistry) -> Self {
        Self { registry }
    }
}

impl FrameSource for DirectoryFrames<'_> {
    fn frames_for(&mut self, dir: &Path) -> EngineResult<Vec<SpriteHandle>> {
        let files = frame_files(dir)?;
        Ok(files.iter().map(|p| self.registry.register(p)).collect())
    }
}

/// List frame image files in `dir`, sorted lexically by file name.
/// Non-images and sprite sheets are skipped.
pub fn frame_files(dir: &Path) -> EngineResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(EngineError::AnimationDirMissing(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| EngineError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| EngineError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && is_frame_image(&path) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(EngineError::NoFrames(dir.to_path_buf()));
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_frame_image(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.contains(SHEET_MARKER) {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.as_str()))
}
