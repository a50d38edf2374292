//! bulkmeta CLI
//!
//! Inspect the metadata documents of a bulk directory on local disk.

use std::path::PathBuf;

use bulkmeta::fs::LocalFs;
use bulkmeta::{BulkMetadata, Config, TableId};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// bulkmeta CLI
#[derive(Parser, Debug)]
#[command(name = "bulkmeta-cli")]
#[command(about = "Inspect bulk-load mapping and rename documents")]
#[command(version)]
struct Args {
    /// Bulk directory holding the documents
    #[arg(short, long)]
    dir: PathBuf,

    /// Table id to tag extents with
    #[arg(short, long)]
    table: String,

    /// Load mapping document name
    #[arg(long, default_value = bulkmeta::config::DEFAULT_LOAD_MAPPING_FILE)]
    mapping_file: String,

    /// Rename table document name
    #[arg(long, default_value = bulkmeta::config::DEFAULT_RENAME_FILE)]
    rename_file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print each extent and its files
    Dump {
        /// Resolve file names through the rename table
        #[arg(short, long)]
        renamed: bool,
    },

    /// Print every current data file name
    Files,

    /// Print the rename table
    Renames,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bulkmeta=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> bulkmeta::Result<()> {
    let config = Config::builder()
        .load_mapping_file(args.mapping_file)
        .rename_file(args.rename_file)
        .build()?;
    let catalog = BulkMetadata::new(config)?;
    let table_id = TableId::new(args.table);

    match args.command {
        Commands::Dump { renamed } => {
            let mut iter = if renamed {
                catalog.updated_load_mapping(&args.dir, &table_id, &LocalFs)?
            } else {
                catalog.read_load_mapping(&args.dir, &table_id, &LocalFs)?
            };

            let result = (|| -> bulkmeta::Result<()> {
                while let Some((extent, files)) = iter.next_mapping()? {
                    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
                    println!("{}\t{}\t{}", extent, files.est_size(), names.join(","));
                }
                Ok(())
            })();
            iter.close();
            tracing::info!("Dumped {} extents", iter.pulled());
            result
        }
        Commands::Files => {
            for name in catalog.all_files(&args.dir, &table_id, &LocalFs)? {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Renames => {
            let renames = catalog.read_rename_map(&args.dir, &table_id, &LocalFs)?;
            let mut entries: Vec<_> = renames.into_iter().collect();
            entries.sort();
            for (old, new) in entries {
                println!("{}\t{}", old, new);
            }
            Ok(())
        }
    }
}
