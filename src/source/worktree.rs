//! Files on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;

use super::{Content, ContentSource, SourceError, index_path};

pub struct WorkTreeSource {
    /// Canonical root; every served file must live under it.
    root: PathBuf,
}

impl WorkTreeSource {
    pub fn open(root: &Path) -> Result<Self, SourceError> {
        let root = root
            .canonicalize()
            .map_err(|e| SourceError::Open(root.to_path_buf(), e.into()))?;
        if !root.is_dir() {
            return Err(SourceError::Open(root, "not a directory".into()));
        }
        Ok(Self { root })
    }

    /// Map `path` to a file under the root, along with the repository path
    /// it was found at.
    ///
    /// Rejects `..` components and anything that resolves outside the root
    /// through symlinks.
    fn resolve(&self, path: &str) -> Option<(String, PathBuf)> {
        if path.split('/').any(|part| part == "..") {
            return None;
        }

        let canonical = self.root.join(path).canonicalize().ok()?;
        if !canonical.starts_with(&self.root) {
            return None;
        }

        if canonical.is_file() {
            return Some((path.to_string(), canonical));
        }

        let path = index_path(path);
        let index = self.root.join(&path).canonicalize().ok()?;
        (index.starts_with(&self.root) && index.is_file()).then_some((path, index))
    }
}

impl ContentSource for WorkTreeSource {
    fn describe(&self) -> String {
        format!("{} (working tree)", self.root.display())
    }

    fn read(&self, path: &str) -> Result<Option<Content>> {
        let Some((path, file)) = self.resolve(path) else {
            return Ok(None);
        };
        let data = fs::read(&file).map_err(|e| SourceError::Io(file, e))?;
        Ok(Some(Content::new(path, data)))
    }
}
