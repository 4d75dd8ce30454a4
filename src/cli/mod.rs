use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};

use crate::config::{self, Credentials};
use crate::domain::criteria::SearchCriteria;
use crate::render::text;
use crate::spotify::{RESULT_LIMIT, SpotifyClient, TrackSearch};

#[derive(Parser)]
#[command(name = "trackfinder")]
#[command(version = "0.1")]
#[command(about = "Advanced track search over the Spotify catalog")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run http server hosting the search form
    Serve,
    /// Run a single search and print the results
    Search {
        #[arg(long)]
        track: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        composer: Option<String>,
        /// Release year, 1900 to 2024
        #[arg(long)]
        year: Option<String>,
        /// Print the query instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            let cfg = config::Config::load(&cli.config)?;
            let client = SpotifyClient::new(cfg.spotify, Credentials::load());

            let http_server = crate::http::server::HttpServer::new(Arc::new(client), cfg.http);

            println!(
                "HTTP server running at http://{}:{}",
                http_server.config.bind_addr, http_server.config.port
            );
            http_server.run();
        }

        Commands::Search {
            track,
            artist,
            composer,
            year,
            dry_run,
        } => {
            let criteria = SearchCriteria::from_fields(track, artist, composer, year.as_deref())?;
            let query = criteria.to_query();

            if dry_run {
                println!("{query}");
                return Ok(());
            }

            let cfg = config::Config::load(&cli.config)?;
            let client = SpotifyClient::new(cfg.spotify, Credentials::load());

            let outcome = client
                .search_tracks(&query, RESULT_LIMIT)
                .inspect_err(|e| log::warn!("Search for {query:?} failed: {e}"));
            print!("{}", text::render_outcome(&outcome));
        }
    }

    Ok(())
}
