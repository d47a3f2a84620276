//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blogsite")]
#[command(about = "Static blog builder", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project root (default: BLOG_ROOT, or the nearest directory with blogsite.toml)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the site into the output directory
    Build {
        /// Build mode (development, production); overrides APP_ENV
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// List every tag used on the site
    Tags,

    /// Show the effective configuration
    Config {
        /// Dotted key to show a single value (e.g. dirs.output)
        key: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_with_mode() {
        let cli = Cli::try_parse_from(["blogsite", "build", "--mode", "dev"]).unwrap();
        match cli.command {
            Commands::Build { mode } => assert_eq!(mode.as_deref(), Some("dev")),
            other => panic!("Expected Build, got {:?}", other),
        }
        assert!(cli.root.is_none());
    }

    #[test]
    fn test_root_after_subcommand() {
        let cli = Cli::try_parse_from(["blogsite", "tags", "--root", "/tmp/site"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/site")));
        assert!(matches!(cli.command, Commands::Tags));
    }
}
