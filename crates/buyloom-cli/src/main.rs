mod catalog;
mod import;
mod sample;

use std::path::PathBuf;

use buyloom_core::ProductFilter;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "buyloom-cli")]
#[command(about = "Buyloom catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import products from a CSV file into the catalog
    Import {
        /// CSV file to import
        path: PathBuf,

        /// Parse and report without writing to the catalog
        #[arg(long)]
        dry_run: bool,

        /// Print the full parse result as JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
    /// Write the sample import template
    Sample {
        /// Destination file (defaults to the template's file name)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Debug, Subcommand)]
enum CatalogCommands {
    /// List catalog products, optionally filtered
    List {
        /// Case-insensitive text to find in the name or description
        #[arg(long, short)]
        search: Option<String>,

        /// Exact category; "All" matches every category
        #[arg(long, short)]
        category: Option<String>,

        /// Only products carrying this tag
        #[arg(long, short)]
        tag: Option<String>,
    },
    /// Show one product, including its go-link
    Show { id: Uuid },
    /// Change fields of one product; the result must still validate
    Update {
        id: Uuid,

        #[command(flatten)]
        edits: catalog::ProductEdits,
    },
    /// Delete one product
    Remove { id: Uuid },
    /// Print the affiliate URL behind a /go/ link
    Resolve {
        /// Go-link path, e.g. /go/gfjcy7?pid=<id>
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = buyloom_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, catalog = %config.catalog_path.display(), "config loaded");

    match cli.command {
        Some(Commands::Import {
            path,
            dry_run,
            json,
        }) => import::run_import(&config, &path, dry_run, json),
        Some(Commands::Sample { output }) => {
            let written = sample::write_sample(output.as_deref())?;
            println!("wrote sample template to {}", written.display());
            Ok(())
        }
        Some(Commands::Catalog { command }) => match command {
            CatalogCommands::List {
                search,
                category,
                tag,
            } => {
                let filter = ProductFilter {
                    query: search,
                    category,
                    tag,
                };
                catalog::run_list(&config, &filter)
            }
            CatalogCommands::Show { id } => catalog::run_show(&config, id),
            CatalogCommands::Update { id, edits } => catalog::run_update(&config, id, edits),
            CatalogCommands::Remove { id } => catalog::run_remove(&config, id),
            CatalogCommands::Resolve { path } => catalog::run_resolve(&config, &path),
        },
        None => {
            println!("buyloom-cli: no command given; run with --help for usage");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
