//! Configuration management for `reposite.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── fileset    # [[fileset]]
//! │   ├── repo       # [repo]
//! │   └── serve      # [serve]
//! ├── error          # ConfigError, ConfigDiagnostics
//! ├── util           # URL/path helpers, config file lookup
//! └── mod.rs         # Config (this file)
//! ```
//!
//! The config file is optional: without one, every section takes its
//! defaults and the current directory is the repository root.

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{FilesetConfig, RepoConfig, ServeConfig};

use util::{extract_url_path, find_config_file, normalize_path};

use crate::{
    cli::{Cli, Commands, SourceArgs},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::Path,
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing reposite.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Content location
    #[serde(default)]
    pub repo: RepoConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// File categories, in priority order
    #[serde(default, rename = "fileset")]
    pub filesets: Vec<FilesetConfig>,
}

impl Config {
    /// Load configuration for the given command line.
    ///
    /// Searches upward from cwd for the config file. Relative paths in the
    /// file resolve against the file's directory, or against cwd when there
    /// is no file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (mut config, base) = match find_config_file(&cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let config = Self::from_path(&path)?;
                let base = path.parent().map_or_else(|| cwd.clone(), Path::to_path_buf);
                (config, base)
            }
            None => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                (Self::default(), cwd)
            }
        };

        config.finalize(&base, cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Filesets in effect, in priority order.
    pub fn filesets(&self) -> &[FilesetConfig] {
        &self.filesets
    }

    // ========================================================================
    // finalization
    // ========================================================================

    /// Resolve paths, apply CLI overrides and derived values.
    fn finalize(&mut self, base: &Path, cli: &Cli) {
        self.apply_command_options(cli);
        self.repo.root = normalize_path(&base.join(&self.repo.root));
        self.sync_prefix_from_url();

        if self.filesets.is_empty() {
            self.filesets = FilesetConfig::defaults();
        }
    }

    /// Derive `serve.prefix` from `serve.url` when no prefix is given.
    fn sync_prefix_from_url(&mut self) {
        if self.serve.prefix.is_none()
            && let Some(ref url) = self.serve.url
            && let Some(path) = extract_url_path(url)
        {
            self.serve.prefix = Some(format!("/{path}"));
        }
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Cat { source, prefix, .. } => {
                self.apply_source_args(source);
                Self::update_option(&mut self.serve.prefix, prefix.clone().map(Some).as_ref());
            }
            Commands::Serve {
                source,
                interface,
                port,
                prefix,
            } => {
                self.apply_source_args(source);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.prefix, prefix.clone().map(Some).as_ref());
            }
            // Diagnostic mode takes everything from its arguments
            Commands::Prefix { .. } => {}
        }
    }

    fn apply_source_args(&mut self, args: &SourceArgs) {
        Self::update_option(&mut self.repo.root, args.root.as_ref());
        Self::update_option(&mut self.repo.rev, args.rev.as_ref());
        if args.worktree {
            self.repo.worktree = true;
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.validate_serve(&mut diag);
        self.validate_repo(&mut diag);
        self.validate_filesets(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    fn validate_serve(&self, diag: &mut ConfigDiagnostics) {
        if let Some(prefix) = &self.serve.prefix
            && !prefix.is_empty()
            && !prefix.starts_with('/')
        {
            diag.error_with_hint(
                "serve.prefix",
                format!("`{prefix}` must start with `/`"),
                format!("prefix = \"/{prefix}\""),
            );
        }

        if let Some(url) = &self.serve.url
            && extract_url_path(url).is_none()
        {
            diag.error_with_hint(
                "serve.url",
                format!("`{url}` is not a valid URL"),
                "include the scheme, e.g. https://example.com/docs",
            );
        }
    }

    fn validate_repo(&self, diag: &mut ConfigDiagnostics) {
        if !self.repo.worktree && self.repo.rev.trim().is_empty() {
            diag.error_with_hint(
                "repo.rev",
                "revision cannot be empty",
                "set `worktree = true` to serve files on disk",
            );
        }
    }

    fn validate_filesets(&self, diag: &mut ConfigDiagnostics) {
        let mut seen = HashSet::new();

        for (i, fileset) in self.filesets.iter().enumerate() {
            let field = |name: &str| format!("fileset[{i}].{name}");

            if fileset.name.trim().is_empty() {
                diag.error(field("name"), "fileset name cannot be empty");
            } else if !seen.insert(fileset.name.as_str()) {
                diag.error(field("name"), format!("duplicate fileset `{}`", fileset.name));
            }

            if fileset.include.is_empty() {
                diag.error_with_hint(
                    field("include"),
                    "fileset matches nothing",
                    "include = [\"**\"] matches every file",
                );
            }

            for (key, patterns) in [("include", &fileset.include), ("exclude", &fileset.exclude)] {
                for pattern in patterns {
                    if let Err(e) = globset::Glob::new(pattern) {
                        diag.error(field(key), format!("invalid glob `{pattern}`: {e}"));
                    }
                }
            }
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (parsed, ignored) = Config::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
