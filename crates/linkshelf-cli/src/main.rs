//! linkshelf CLI
//!
//! Command-line interface for linkshelf - a personal bookmark list.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use linkshelf_core::{Config, FileStorage, LinkStore};

mod clipboard;
mod commands;
mod logging;
mod output;
mod prompt;

use clipboard::SystemClipboard;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "linkshelf")]
#[command(about = "linkshelf - Save, tag and search your links")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new link
    Add {
        /// URL to save
        url: String,
        /// Title (defaults to the URL)
        #[arg(short = 'T', long, default_value = "")]
        title: String,
        /// Comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,
    },
    /// List all links
    #[command(alias = "ls")]
    List,
    /// Search links by title, URL or tag
    Search {
        /// Text to look for (case-insensitive)
        term: String,
    },
    /// Show link details
    Show {
        /// Link ID (full or prefix)
        id: String,
    },
    /// Edit a link
    Edit {
        /// Link ID (full or prefix)
        id: String,
        /// New URL
        #[arg(long)]
        url: Option<String>,
        /// New title
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// New comma-separated tags (replaces existing)
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID (full or prefix)
        id: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Copy a link's URL to the clipboard
    Copy {
        /// Link ID (full or prefix)
        id: String,
    },
    /// Write all links to a JSON backup file
    Export {
        /// Output file (defaults to the configured export_file)
        path: Option<PathBuf>,
    },
    /// Append links from a JSON backup file
    Import {
        /// File to read
        path: PathBuf,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, export_file, log_level, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    logging::init(&config);

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let mut store = LinkStore::open(FileStorage::from_config(&config));

    match cli.command {
        Commands::Add { url, title, tags } => {
            commands::link::add(&mut store, &url, &title, &tags, &output)
        }
        Commands::List => commands::link::list(&store, &output),
        Commands::Search { term } => commands::link::search(&store, &term, &output),
        Commands::Show { id } => commands::link::show(&store, &id, &output),
        Commands::Edit {
            id,
            url,
            title,
            tags,
        } => commands::link::edit(&mut store, &id, url, title, tags, &output),
        Commands::Delete { id, yes } => commands::link::delete(&mut store, &id, yes, &output),
        Commands::Copy { id } => {
            commands::link::copy(&store, &id, SystemClipboard, &output).await
        }
        Commands::Export { path } => {
            let path = path.unwrap_or_else(|| config.export_file.clone());
            commands::transfer::export(&store, &path, &output)
                .await
                .map(|_| ())
        }
        Commands::Import { path } => commands::transfer::import(&mut store, &path, &output)
            .await
            .map(|_| ()),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(&key, &value, config_path, output)
        }
    }
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
    fn test_parse_add() {
        let cli = Cli::parse_from(["linkshelf", "add", "https://x.test", "--tags", "a, b"]);
        match cli.command {
            Commands::Add { url, title, tags } => {
                assert_eq!(url, "https://x.test");
                assert_eq!(title, "");
                assert_eq!(tags, "a, b");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_edit_partial() {
        let cli = Cli::parse_from(["linkshelf", "--json", "edit", "abc", "-T", "New"]);
        assert!(cli.json);
        match cli.command {
            Commands::Edit {
                id, url, title, tags,
            } => {
                assert_eq!(id, "abc");
                assert!(url.is_none());
                assert_eq!(title.as_deref(), Some("New"));
                assert!(tags.is_none());
            }
            _ => panic!("expected edit"),
        }
    }
}
