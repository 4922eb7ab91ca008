//! File categories.
//!
//! A fileset pairs include/exclude globs with the processor its files go
//! through before they are served. Filesets are tried in declaration order
//! and the first match wins:
//!
//! ```text
//! docs/index.html   → pages  (Html: absolute URLs get the mount prefix)
//! docs/logo.svg     → assets (Raw: bytes as stored)
//! ```
//!
//! Globs are matched against repository-relative, `/`-separated paths.
//! `*` does not cross directory boundaries; use `**` for that.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, FilesetConfig};
use crate::prefix::prefix_html;

// ============================================================================
// Processor
// ============================================================================

/// How a file's bytes are transformed before serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Processor {
    /// HTML pages: absolute-path URLs are rewritten under the mount prefix.
    Html,
    /// Served as stored.
    #[default]
    Raw,
}

impl Processor {
    pub fn process(self, content: Vec<u8>, prefix: &str) -> Vec<u8> {
        match self {
            Self::Html => prefix_html(&content, prefix),
            Self::Raw => content,
        }
    }
}

// ============================================================================
// Fileset
// ============================================================================

#[derive(Debug, Clone)]
pub struct Fileset {
    pub name: String,
    include: GlobSet,
    exclude: GlobSet,
    pub processor: Processor,
}

impl Fileset {
    pub fn from_config(config: &FilesetConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            name: config.name.clone(),
            include: build_glob_set(&config.name, &config.include)?,
            exclude: build_glob_set(&config.name, &config.exclude)?,
            processor: config.processor,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

fn build_glob_set(name: &str, patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| ConfigError::Glob(pattern.clone(), name.to_string(), e))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| ConfigError::Glob(patterns.join(", "), name.to_string(), e))
}

// ============================================================================
// Filesets
// ============================================================================

/// All filesets, in priority order.
#[derive(Debug, Clone)]
pub struct Filesets(Vec<Fileset>);

impl Filesets {
    pub fn from_config(configs: &[FilesetConfig]) -> Result<Self, ConfigError> {
        configs
            .iter()
            .map(Fileset::from_config)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// First fileset claiming `path`, or `None` if the file is not served.
    pub fn classify(&self, path: &str) -> Option<&Fileset> {
        self.0.iter().find(|fileset| fileset.matches(path))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
