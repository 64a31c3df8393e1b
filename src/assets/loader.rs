use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{QuirlError, QuirlResult};

/// Fetches frame artwork bytes by their conventional `frames/<filename>`
/// relative path.
///
/// The engine only ever asks for paths drawn from the fixed catalog.
/// Implementations must return within a bounded time; a load that exceeds the
/// composer's configured wait is treated as failed and the composition falls
/// back to the unframed render.
pub trait ArtworkLoader: Send + Sync {
    /// Fetch raw artwork bytes for a catalog-relative path.
    fn fetch(&self, rel_path: &str) -> QuirlResult<Vec<u8>>;
}

/// Filesystem-backed loader resolving artwork under a root directory.
#[derive(Clone, Debug)]
pub struct FsArtworkLoader {
    root: PathBuf,
}

impl FsArtworkLoader {
    /// Resolve artwork relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used when resolving relative artwork paths.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtworkLoader for FsArtworkLoader {
    fn fetch(&self, rel_path: &str) -> QuirlResult<Vec<u8>> {
        let norm = normalize_rel_path(rel_path)?;
        let path = self.root.join(Path::new(&norm));
        std::fs::read(&path)
            .with_context(|| format!("read artwork bytes from '{}'", path.display()))
            .map_err(|e| QuirlError::asset_load(format!("{e:#}")))
    }
}

/// Normalize and validate catalog-relative artwork paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> QuirlResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(QuirlError::asset_load("artwork paths must be relative"));
    }
    if s.is_empty() {
        return Err(QuirlError::asset_load("artwork path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(QuirlError::asset_load("artwork paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(QuirlError::asset_load("artwork path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
