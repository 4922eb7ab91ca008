//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Serve a repository's HTML under a base path
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: reposite.toml)
    #[arg(short = 'C', long, global = true, default_value = "reposite.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite absolute URLs in one HTML file and print the result
    #[command(visible_alias = "p")]
    Prefix {
        /// HTML file to read
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Base path to put in front of absolute URLs (e.g. /docs)
        prefix: String,
    },

    /// Print one file from the repository as it would be served
    #[command(visible_alias = "c")]
    Cat {
        /// Repository-relative path (directories print their index.html)
        path: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Base path the content is mounted under
        #[arg(short = 'P', long)]
        prefix: Option<String>,
    },

    /// Start the HTTP server
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Base path the content is mounted under
        #[arg(short = 'P', long)]
        prefix: Option<String>,
    },
}

/// Where content is read from; overrides `[repo]`.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Repository root
    #[arg(short = 'R', long, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Git revision to read (branch, tag, commit)
    #[arg(short, long)]
    pub rev: Option<String>,

    /// Read files on disk instead of a revision
    #[arg(short, long)]
    pub worktree: bool,
}
