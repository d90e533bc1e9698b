//! CLI module - Command-line interface for Marquee
//!
//! Each command stands in for one screen of the mobile app.

mod commands;

pub use commands::cmd_init;

use clap::{Parser, Subcommand};

use crate::domain::MovieId;
use crate::state::AppState;

/// Marquee - browse movies, bookmark favourites, see what people search for
#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print a Prometheus metrics snapshot after the command
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search movies by title and count the search
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List popular movies
    #[command(alias = "d")]
    Discover,

    /// Show movie details and whether it is saved
    #[command(alias = "i", alias = "info")]
    Show {
        /// TMDB movie ID
        id: MovieId,
    },

    /// Save a movie, or unsave it if already saved
    #[command(alias = "toggle")]
    Save {
        /// TMDB movie ID
        id: MovieId,
    },

    /// List saved movies
    #[command(alias = "ls")]
    Saved,

    /// Show the most searched movies
    #[command(alias = "t")]
    Trending,

    /// Create default config file
    Init,
}

pub async fn execute(command: Commands, state: &AppState) -> anyhow::Result<()> {
    match command {
        Commands::Search { query } => commands::cmd_search(state, &query.join(" ")).await,
        Commands::Discover => commands::cmd_discover(state).await,
        Commands::Show { id } => commands::cmd_show(state, id).await,
        Commands::Save { id } => commands::cmd_save(state, id).await,
        Commands::Saved => commands::cmd_saved(state).await,
        Commands::Trending => commands::cmd_trending(state).await,
        Commands::Init => commands::cmd_init(),
    }
}
