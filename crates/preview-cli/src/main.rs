//! Component preview engine CLI.
//!
//! Loads a serialized project snapshot (flat path → content JSON) into an
//! in-memory VFS and drives the engine against it:
//!
//! - `transform` - run a module transform pass and print the import map,
//!   module table, and diagnostics
//! - `ls` - list a directory of the snapshot
//! - `cat` - show a file with line numbers
//! - `completions` - generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Transform a project with the default /App entry
//! preview-cli transform project.json
//!
//! # Machine-readable result for a custom entry
//! preview-cli --format json transform project.json --entry /src/Main
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

use commands::OutputFormat;

/// Component preview engine - in-memory VFS and module transform pipeline.
#[derive(Parser, Debug)]
#[command(name = "preview-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (pretty, json)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a module transform pass over a project snapshot.
    ///
    /// Prints the import map, module addresses, aggregated styles size, and
    /// any per-module diagnostics. Fails only when the entry module cannot
    /// be resolved.
    Transform {
        /// Path to the project snapshot (flat path -> content JSON)
        project: PathBuf,

        /// Entry specifier (default: /App)
        #[arg(long)]
        entry: Option<String>,

        /// Alias prefix rewritten to the VFS root (default: @/)
        #[arg(long)]
        alias: Option<String>,

        /// Base URL for bare package specifiers (default: https://esm.sh/)
        #[arg(long = "package-base")]
        package_base: Option<String>,
    },

    /// List a directory of a project snapshot.
    Ls {
        /// Path to the project snapshot
        project: PathBuf,

        /// Directory to list (default: /)
        path: Option<String>,
    },

    /// Show a file of a project snapshot with line numbers.
    Cat {
        /// Path to the project snapshot
        project: PathBuf,

        /// File (or directory) path inside the snapshot
        path: String,

        /// Inclusive 1-based line range, START:END
        #[arg(long)]
        range: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    match cli.command {
        Commands::Transform {
            project,
            entry,
            alias,
            package_base,
        } => {
            let rendered =
                commands::transform_project(&project, entry, alias, package_base, format)?;
            println!("{rendered}");
        }
        Commands::Ls { project, path } => {
            println!("{}", commands::ls(&project, path.as_deref())?);
        }
        Commands::Cat {
            project,
            path,
            range,
        } => {
            println!("{}", commands::cat(&project, &path, range.as_deref())?);
        }
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "preview-cli", &mut std::io::stdout());
        }
    }
    Ok(())
}

/// Initializes logging to stderr, honoring `RUST_LOG` unless `--verbose`
/// forces debug level.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_transform() {
        let cli = Cli::parse_from(["preview-cli", "transform", "project.json"]);
        assert!(matches!(cli.command, Commands::Transform { .. }));
    }

    #[test]
    fn test_cli_parsing_transform_with_overrides() {
        let cli = Cli::parse_from([
            "preview-cli",
            "transform",
            "project.json",
            "--entry",
            "/src/Main",
            "--alias",
            "~/",
            "--package-base",
            "https://cdn.example.com/",
        ]);
        if let Commands::Transform {
            project,
            entry,
            alias,
            package_base,
        } = cli.command
        {
            assert_eq!(project, PathBuf::from("project.json"));
            assert_eq!(entry.as_deref(), Some("/src/Main"));
            assert_eq!(alias.as_deref(), Some("~/"));
            assert_eq!(package_base.as_deref(), Some("https://cdn.example.com/"));
        } else {
            panic!("expected Transform command");
        }
    }

    #[test]
    fn test_cli_parsing_ls_default_path() {
        let cli = Cli::parse_from(["preview-cli", "ls", "project.json"]);
        if let Commands::Ls { path, .. } = cli.command {
            assert!(path.is_none());
        } else {
            panic!("expected Ls command");
        }
    }

    #[test]
    fn test_cli_parsing_cat_with_range() {
        let cli = Cli::parse_from([
            "preview-cli",
            "cat",
            "project.json",
            "/App.jsx",
            "--range",
            "1:20",
        ]);
        if let Commands::Cat { path, range, .. } = cli.command {
            assert_eq!(path, "/App.jsx");
            assert_eq!(range.as_deref(), Some("1:20"));
        } else {
            panic!("expected Cat command");
        }
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["preview-cli", "--verbose", "ls", "project.json"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_format_default() {
        let cli = Cli::parse_from(["preview-cli", "ls", "project.json"]);
        assert_eq!(cli.format, "pretty");
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::parse_from(["preview-cli", "completions", "zsh"]);
        if let Commands::Completions { shell } = cli.command {
            assert_eq!(shell, Shell::Zsh);
        } else {
            panic!("expected Completions command");
        }
    }
}
