//! Command-line interface module.

mod args;
pub mod cat;
pub mod prefix;

pub use args::{Cli, Commands, SourceArgs};
