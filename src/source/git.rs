//! Files at a git revision.
//!
//! The revision is resolved on every read, so serving a branch follows new
//! commits without a restart.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gix::{ThreadSafeRepository, object::Kind};

use super::{Content, ContentSource, INDEX_FILE, SourceError, index_path};

pub struct GitSource {
    repo: ThreadSafeRepository,
    root: PathBuf,
    rev: String,
}

impl GitSource {
    /// Open the repository at `root`, checking that `rev` resolves.
    pub fn open(root: &Path, rev: &str) -> Result<Self, SourceError> {
        let repo = gix::open(root).map_err(|e| SourceError::Open(root.to_path_buf(), e.into()))?;
        repo.rev_parse_single(rev)
            .map_err(|e| SourceError::Revision(rev.to_string(), e.into()))?;

        Ok(Self {
            repo: repo.into_sync(),
            root: root.to_path_buf(),
            rev: rev.to_string(),
        })
    }
}

impl ContentSource for GitSource {
    fn describe(&self) -> String {
        format!("{} at {}", self.root.display(), self.rev)
    }

    fn read(&self, path: &str) -> Result<Option<Content>> {
        let repo = self.repo.to_thread_local();
        let root = repo
            .rev_parse_single(self.rev.as_str())
            .with_context(|| format!("cannot resolve revision `{}`", self.rev))?
            .object()?
            .peel_to_tree()
            .with_context(|| format!("revision `{}` has no tree", self.rev))?;

        let tree = if path.is_empty() {
            root
        } else {
            let Some(entry) = root.lookup_entry_by_path(path)? else {
                return Ok(None);
            };
            let object = entry.object()?;
            match object.kind {
                Kind::Blob => return Ok(Some(Content::new(path, object.detach().data))),
                Kind::Tree => object.into_tree(),
                // submodule commits
                _ => return Ok(None),
            }
        };

        let Some(entry) = tree.lookup_entry_by_path(INDEX_FILE)? else {
            return Ok(None);
        };
        let object = entry.object()?;
        Ok((object.kind == Kind::Blob)
            .then(|| Content::new(index_path(path), object.detach().data)))
    }
}
