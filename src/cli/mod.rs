//! CLI module for the image builder
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `build` - Build a repository's image and stream the log
//! - `select` - Drive the repository combobox with a key script
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Build the default branch of a GitHub repository
//! imagebuilder build jupyterhub/binderhub --base-url http://localhost:8000
//!
//! # Pick a repository from a list with the keyboard
//! imagebuilder select -o org/alpha -o org/beta --keys "o,r,g,Down,Enter"
//!
//! # Generate shell completions
//! imagebuilder completions bash > ~/.bash_completion.d/imagebuilder
//! ```

pub mod build;
pub mod completions;
pub mod config;
pub mod output;
pub mod select;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Image builder - BinderHub build client
#[derive(Parser, Debug)]
#[command(
    name = "imagebuilder",
    version,
    about = "Build repository images on a BinderHub build service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an image and stream the build log
    Build(BuildArgs),
    /// Run a key script against the repository combobox
    Select(SelectArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Repository as organization/repository or a GitHub URL
    pub repository: String,

    /// Branch, tag or commit (defaults to build.default_ref)
    #[arg(short = 'r', long = "ref")]
    pub git_ref: Option<String>,

    /// Override the build service origin
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Token appended to the build request
    #[arg(short, long)]
    pub token: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "imagebuilder.toml")]
    pub config: PathBuf,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "IMAGEBUILDER_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Candidate option (repeatable)
    #[arg(short, long = "option")]
    pub options: Vec<String>,

    /// Comma-separated key names: characters, Down, Up, Enter, Escape, Home, End,
    /// Alt+Down, Backspace, Comma, Focus, Blur
    #[arg(short, long, default_value = "")]
    pub keys: String,

    /// Field label
    #[arg(long, default_value = "Repository")]
    pub label: String,

    /// Message shown when the field is left empty
    #[arg(long)]
    pub required: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "imagebuilder.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,

    /// BinderHub origin written as build.base_url
    #[arg(short, long)]
    pub base_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_build_defaults() {
        let cli = Cli::try_parse_from(["imagebuilder", "build", "org/repo"]).unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.repository, "org/repo");
                assert_eq!(args.config, PathBuf::from("imagebuilder.toml"));
                assert!(args.git_ref.is_none());
                assert!(args.base_url.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_parse_build_with_ref_and_url() {
        let cli = Cli::try_parse_from([
            "imagebuilder",
            "build",
            "org/repo",
            "--ref",
            "v1.0",
            "-b",
            "http://hub.example:8000",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.git_ref.as_deref(), Some("v1.0"));
                assert_eq!(args.base_url.as_deref(), Some("http://hub.example:8000"));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_parse_select() {
        let cli = Cli::try_parse_from([
            "imagebuilder",
            "select",
            "-o",
            "alpha",
            "--option",
            "beta",
            "--keys",
            "a,Down",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Select(args) => {
                assert_eq!(args.options, vec!["alpha", "beta"]);
                assert_eq!(args.keys, "a,Down");
                assert!(args.json);
            }
            _ => panic!("Expected Select command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from([
            "imagebuilder",
            "config",
            "init",
            "--force",
            "-b",
            "https://hub.example.org",
        ])
        .unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => {
                assert!(args.force);
                assert_eq!(args.base_url.as_deref(), Some("https://hub.example.org"));
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_cli_build_requires_repository() {
        assert!(Cli::try_parse_from(["imagebuilder", "build"]).is_err());
    }
}
