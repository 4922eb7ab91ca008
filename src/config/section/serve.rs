//! `[serve]` section configuration.
//!
//! Contains HTTP server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 5280                 # HTTP port number
//! prefix = "/docs"            # Base path the site is mounted under
//! url = "https://example.com/docs"  # Alternative to `prefix`: its path is used
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server accessible from LAN.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Base path the content is mounted under; absolute-path URLs in served
    /// HTML pages get this prefix.
    pub prefix: Option<String>,

    /// Public site URL. When `prefix` is unset, its path component becomes
    /// the prefix (e.g. `https://example.github.io/project` → `/project`).
    pub url: Option<String>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 5280,
            prefix: None,
            url: None,
        }
    }
}

impl ServeConfig {
    /// Effective mount prefix: no trailing slash, empty for the root.
    pub fn mount_prefix(&self) -> &str {
        self.prefix
            .as_deref()
            .map_or("", |prefix| prefix.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    use crate::config::test_parse_config;

    #[test]
    fn test_serve_config() {
        let config = test_parse_config(
            "[serve]\ninterface = \"0.0.0.0\"\nport = 8080\nprefix = \"/docs\"",
        );

        assert_eq!(
            config.serve.interface,
            IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))
        );
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.serve.mount_prefix(), "/docs");
    }

    #[test]
    fn test_serve_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(
            config.serve.interface,
            IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert_eq!(config.serve.port, 5280);
        assert!(config.serve.prefix.is_none());
        assert_eq!(config.serve.mount_prefix(), "");
    }

    #[test]
    fn test_serve_config_ipv6() {
        let config = test_parse_config("[serve]\ninterface = \"::1\"");
        assert_eq!(
            config.serve.interface,
            IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    }

    #[test]
    fn test_mount_prefix_trailing_slashes() {
        let config = test_parse_config("[serve]\nprefix = \"/docs//\"");
        assert_eq!(config.serve.mount_prefix(), "/docs");

        let config = test_parse_config("[serve]\nprefix = \"/\"");
        assert_eq!(config.serve.mount_prefix(), "");
    }
}
