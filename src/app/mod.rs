//! Command-line entry point wiring clap to the file type classifier.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use filetypes::{FiletypesUtil, Registry};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

#[derive(Parser)]
#[command(name = "filetypes")]
#[command(about = "Normalize, check and describe accepted file type lists", long_about = None)]
#[command(version)]
struct Cli {
    /// Registry JSON file replacing the built-in table
    #[arg(long, global = true, env = "FILETYPES_REGISTRY")]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of a type list
    Normalize { types: String },

    /// Replace groups and MIME types with their extensions
    Expand {
        types: String,

        /// Keep group names in the output
        #[arg(long)]
        groups: bool,

        /// Keep MIME types in the output
        #[arg(long)]
        mimetypes: bool,
    },

    /// Describe a type list in human-readable rows
    Describe { types: String },

    /// Check whether a file name is accepted by a type list
    Check { filename: String, list: String },

    /// Check whether all given types are covered by a list
    Listed { types: String, list: String },

    /// Report types the registry does not know
    Unknown { types: String },

    /// Print MIME type and icon for a file name
    Info { filename: String },

    /// Print the group tree used by type pickers
    Browser {
        /// Only offer these types
        #[arg(long, default_value = "")]
        only: String,

        /// Leave out the "All file types" entry
        #[arg(long)]
        no_any: bool,

        /// Types already selected
        #[arg(long, default_value = "")]
        current: String,
    },
}

/// Parse arguments, load the registry and run one command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let registry = load_registry(cli.registry.as_deref())?;
    let util = FiletypesUtil::new(Arc::new(registry));

    match cli.command {
        Commands::Normalize { types } => print_json(&util.normalize(types)),
        Commands::Expand {
            types,
            groups,
            mimetypes,
        } => print_json(&util.expand(types, groups, mimetypes)),
        Commands::Describe { types } => print_json(&util.describe(types)),
        Commands::Check { filename, list } => {
            let allowed = util.is_allowed_file_type(&filename, list);
            print_json(&json!({
                "filename": filename,
                "allowed": allowed,
            }))
        }
        Commands::Listed { types, list } => {
            let not_listed = util.get_not_listed(types, list);
            print_json(&json!({
                "listed": not_listed.is_empty(),
                "not_listed": not_listed,
            }))
        }
        Commands::Unknown { types } => print_json(&util.get_unknown_file_types(types)),
        Commands::Info { filename } => print_json(&json!({
            "mimetype": util.mimetype_for(&filename),
            "icon": util.icon_for(&filename),
        })),
        Commands::Browser {
            only,
            no_any,
            current,
        } => print_json(&util.data_for_browser(only, !no_any, current)),
    }
}

/// Warnings and errors go to stderr unless `RUST_LOG` says otherwise.
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registry(path: Option<&Path>) -> Result<Registry> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading custom file type registry");
            Registry::from_path(path)
        }
        None => Registry::builtin(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output as JSON")?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands};

    #[test]
    fn parses_browser_flags() {
        let cli = Cli::parse_from(["filetypes", "browser", "--only", "web_image", "--no-any"]);
        match cli.command {
            Commands::Browser {
                only,
                no_any,
                current,
            } => {
                assert_eq!(only, "web_image");
                assert!(no_any);
                assert!(current.is_empty());
            }
            _ => panic!("expected browser command"),
        }
    }

    #[test]
    fn registry_flag_is_global() {
        let cli = Cli::parse_from(["filetypes", "normalize", "doc jpg", "--registry", "types.json"]);
        assert_eq!(cli.registry.unwrap().to_str(), Some("types.json"));
    }
}
