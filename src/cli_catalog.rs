//! Catalog maintenance tool
//!
//! Seeds the demo dataset, imports songs from JSON and exports the lookup
//! tables used to train the NLU service.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pezzottify_assistant::catalog_store::{CatalogStore, SqliteCatalogStore};
use pezzottify_assistant::catalog_tools::{import_songs, write_lookup_tables};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cli-catalog")]
#[command(about = "Maintain the assistant's song catalog")]
struct Args {
    #[command(subcommand)]
    command: CatalogCommand,
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Replace the catalog with the demo dataset and default playlist
    Seed {
        #[arg(value_name = "DB")]
        db: PathBuf,

        /// Playlist that receives the first demo songs
        #[arg(long, default_value_t = 1)]
        playlist_id: i64,
    },
    /// Insert the songs of a JSON array file
    Import {
        #[arg(value_name = "DB")]
        db: PathBuf,

        #[arg(value_name = "SONGS_JSON")]
        file: PathBuf,
    },
    /// Write song/artist/album lookup tables for the NLU service
    ExportNlu {
        #[arg(value_name = "DB")]
        db: PathBuf,

        #[arg(value_name = "OUTPUT_DIR")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        CatalogCommand::Seed { db, playlist_id } => {
            let store = SqliteCatalogStore::new(&db)?;
            let count = store.seed_demo(playlist_id)?;
            info!("Seeded {:?} with {} demo songs", db, count);
        }
        CatalogCommand::Import { db, file } => {
            let store = SqliteCatalogStore::new(&db)?;
            let count = import_songs(&store, &file)?;
            info!("Catalog now holds {} songs ({} new)", store.songs_count()?, count);
        }
        CatalogCommand::ExportNlu { db, dir } => {
            let store = SqliteCatalogStore::new(&db)?;
            for path in write_lookup_tables(&store, &dir)? {
                info!("Wrote {:?}", path);
            }
        }
    }
    Ok(())
}
