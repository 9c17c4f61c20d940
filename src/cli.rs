//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolshelf catalog generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: toolshelf.toml)
    #[arg(short = 'C', long, default_value = "toolshelf.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared catalog arguments for Build, List and Serve commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Override the base URL artifacts are published under.
    ///
    /// Useful for CI where the production URL differs from the one in toolshelf.toml.
    ///
    /// Example:
    ///   toolshelf build --base-url "https://alice.github.io/tools"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Minify the generated page
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Copy artifacts into the output directory
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub copy: Option<bool>,

    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a config file and an empty content directory
    Init {
        /// the name(path) of the new project directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Scan the content directory and write the catalog page
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the catalog without writing anything
    List {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Print the embedded record data as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build, then serve the output directory locally
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }

    /// Build arguments of the current command, if it takes any.
    pub fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args }
            | Commands::List { build_args, .. }
            | Commands::Serve { build_args, .. } => Some(build_args),
            Commands::Init { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_base_url() {
        let cli = Cli::parse_from(["toolshelf", "build", "--base-url", "https://x.io"]);
        let args = cli.build_args().unwrap();
        assert_eq!(args.base_url.as_deref(), Some("https://x.io"));
        assert!(!cli.is_init());
    }

    #[test]
    fn test_parse_minify_flag_forms() {
        let cli = Cli::parse_from(["toolshelf", "build", "--minify"]);
        assert_eq!(cli.build_args().unwrap().minify, Some(true));

        let cli = Cli::parse_from(["toolshelf", "build", "--minify", "false"]);
        assert_eq!(cli.build_args().unwrap().minify, Some(false));

        let cli = Cli::parse_from(["toolshelf", "build"]);
        assert_eq!(cli.build_args().unwrap().minify, None);
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::parse_from(["toolshelf", "init", "mytools"]);
        assert!(cli.is_init());
        assert!(cli.build_args().is_none());
    }

    #[test]
    fn test_parse_list_json() {
        let cli = Cli::parse_from(["toolshelf", "-c", "tools", "list", "--json"]);
        assert!(matches!(cli.command, Commands::List { json: true, .. }));
        assert_eq!(cli.content, Some(PathBuf::from("tools")));
    }

    #[test]
    fn test_parse_serve_port() {
        let cli = Cli::parse_from(["toolshelf", "serve", "-p", "8080"]);
        assert!(matches!(cli.command, Commands::Serve { port: Some(8080), .. }));
    }
}
