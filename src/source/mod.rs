//! Content sources.
//!
//! A source hands back the stored bytes of a repository-relative path.
//! Paths are `/`-separated without a leading slash; the empty path is the
//! root directory. A directory resolves to its `index.html`.
//!
//! | Source           | Reads from                       |
//! |------------------|----------------------------------|
//! | `GitSource`      | a git revision (branch, tag, id) |
//! | `WorkTreeSource` | files on disk                    |

mod git;
mod worktree;

pub use git::GitSource;
pub use worktree::WorkTreeSource;

use std::path::PathBuf;

use anyhow::Result;
use thiserror::Error;

use crate::config::RepoConfig;

/// File served for directory paths.
pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open `{0}`")]
    Open(PathBuf, #[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("cannot resolve revision `{0}`")]
    Revision(String, #[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// A file read from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    /// Path of the file actually read (`docs` → `docs/index.html`).
    pub path: String,
    pub data: Vec<u8>,
}

impl Content {
    pub fn new(path: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }
}

pub trait ContentSource: Send + Sync {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Read `path`, or `None` if there is nothing to serve there.
    fn read(&self, path: &str) -> Result<Option<Content>>;
}

/// Path of the index file inside directory `dir`.
fn index_path(dir: &str) -> String {
    if dir.is_empty() {
        INDEX_FILE.to_string()
    } else {
        format!("{dir}/{INDEX_FILE}")
    }
}

/// Open the source selected by `[repo]`.
pub fn open_source(config: &RepoConfig) -> Result<Box<dyn ContentSource>, SourceError> {
    Ok(if config.worktree {
        Box::new(WorkTreeSource::open(&config.root)?)
    } else {
        Box::new(GitSource::open(&config.root, &config.rev)?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_worktree_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "hi").unwrap();

        let config = RepoConfig {
            root: dir.path().to_path_buf(),
            worktree: true,
            ..RepoConfig::default()
        };
        let source = open_source(&config).unwrap();
        assert_eq!(
            source.read("").unwrap(),
            Some(Content::new("index.html", b"hi".to_vec()))
        );
    }

    #[test]
    fn test_index_path() {
        assert_eq!(index_path(""), "index.html");
        assert_eq!(index_path("docs/api"), "docs/api/index.html");
    }

    #[test]
    fn test_open_git_source_without_repo() {
        let dir = tempfile::tempdir().unwrap();
        let config = RepoConfig {
            root: dir.path().to_path_buf(),
            ..RepoConfig::default()
        };
        let err = open_source(&config).err().unwrap();
        assert!(matches!(err, SourceError::Open(..)));
    }
}
