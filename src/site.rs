//! Repository content as it is served.
//!
//! ```text
//! request path ─► ContentSource ─► Filesets::classify ─► Processor ─► body
//!                 (git / disk)     (first match wins)    (html / raw)
//! ```

use anyhow::{Context, Result};

use crate::{
    config::Config,
    debug,
    fileset::Filesets,
    source::{ContentSource, open_source},
};

/// A file ready to be sent.
#[derive(Debug)]
pub struct Served {
    /// Repository path of the file read (directories resolve to their index).
    pub path: String,
    /// Name of the fileset that claimed the file.
    pub fileset: String,
    pub body: Vec<u8>,
}

pub struct Site {
    source: Box<dyn ContentSource>,
    filesets: Filesets,
    prefix: String,
}

impl Site {
    pub fn new(source: Box<dyn ContentSource>, filesets: Filesets, prefix: &str) -> Self {
        Self {
            source,
            filesets,
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Open the source and compile the filesets named by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        let source = open_source(&config.repo)
            .with_context(|| format!("cannot read content from {}", config.repo.root.display()))?;
        let filesets = Filesets::from_config(config.filesets())?;
        debug!("site"; "{} filesets, source {}", filesets.len(), source.describe());

        Ok(Self::new(source, filesets, config.serve.mount_prefix()))
    }

    /// Mount prefix, without trailing slash; empty for the root.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Read `path` and run it through its fileset's processor.
    ///
    /// `None` when the source has nothing at `path` or no fileset claims it.
    pub fn get(&self, path: &str) -> Result<Option<Served>> {
        let Some(content) = self.source.read(path)? else {
            return Ok(None);
        };

        let Some(fileset) = self.filesets.classify(&content.path) else {
            debug!("site"; "{} is in no fileset", content.path);
            return Ok(None);
        };

        Ok(Some(Served {
            body: fileset.processor.process(content.data, &self.prefix),
            path: content.path,
            fileset: fileset.name.clone(),
        }))
    }
}
