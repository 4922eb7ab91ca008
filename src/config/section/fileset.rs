//! `[[fileset]]` tables.
//!
//! Filesets are checked in the order they are declared; the first match
//! decides how a file is processed. Files matched by no fileset are not
//! served.
//!
//! # Example
//!
//! ```toml
//! [[fileset]]
//! name = "pages"
//! include = ["**/*.html"]
//! exclude = ["drafts/**"]
//! processor = "html"          # html | raw
//!
//! [[fileset]]
//! name = "assets"
//! include = ["**"]
//! ```

use serde::{Deserialize, Serialize};

use crate::fileset::Processor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesetConfig {
    pub name: String,

    /// Glob patterns, matched against repository-relative paths.
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub processor: Processor,
}

impl FilesetConfig {
    pub fn new(name: &str, include: &[&str], processor: Processor) -> Self {
        Self {
            name: name.into(),
            include: include.iter().map(|s| (*s).to_string()).collect(),
            exclude: Vec::new(),
            processor,
        }
    }

    /// Used when the config declares no filesets.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("pages", &["**/*.html", "**/*.htm"], Processor::Html),
            Self::new("assets", &["**"], Processor::Raw),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_fileset_tables_keep_order() {
        let config = test_parse_config(
            r#"
[[fileset]]
name = "pages"
include = ["**/*.html"]
exclude = ["drafts/**"]
processor = "html"

[[fileset]]
name = "assets"
include = ["**"]
"#,
        );

        assert_eq!(config.filesets.len(), 2);
        assert_eq!(config.filesets[0].name, "pages");
        assert_eq!(config.filesets[0].exclude, vec!["drafts/**".to_string()]);
        assert_eq!(config.filesets[0].processor, Processor::Html);
        assert_eq!(config.filesets[1].processor, Processor::Raw);
        assert!(config.filesets[1].exclude.is_empty());
    }

    #[test]
    fn test_defaults() {
        let defaults = FilesetConfig::defaults();
        assert_eq!(defaults[0].processor, Processor::Html);
        assert_eq!(defaults[1].include, vec!["**".to_string()]);
    }
}
