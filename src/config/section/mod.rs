//! Configuration section definitions.
//!
//! Each module corresponds to a section in `reposite.toml`:
//!
//! | Module    | TOML Section   | Purpose                              |
//! |-----------|----------------|--------------------------------------|
//! | `repo`    | `[repo]`       | Repository root and revision         |
//! | `serve`   | `[serve]`      | HTTP server, mount prefix            |
//! | `fileset` | `[[fileset]]`  | File categories and their processors |

mod fileset;
mod repo;
mod serve;

pub use fileset::FilesetConfig;
pub use repo::RepoConfig;
pub use serve::ServeConfig;
