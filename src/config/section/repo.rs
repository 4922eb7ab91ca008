//! `[repo]` section configuration.
//!
//! Where content is read from.
//!
//! # Example
//!
//! ```toml
//! [repo]
//! root = "."          # Repository root, relative to reposite.toml
//! rev = "HEAD"        # Revision to serve (branch, tag, commit)
//! worktree = false    # Serve files on disk instead of a revision
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Repository (or plain directory) root. Absolute after loading.
    pub root: PathBuf,

    /// Git revision to read files from.
    pub rev: String,

    /// Read the working tree instead of `rev`.
    pub worktree: bool,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            rev: "HEAD".into(),
            worktree: false,
        }
    }
}
