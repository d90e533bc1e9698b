use std::sync::Arc;
use std::time::Duration;

use crate::clients::{TmdbClient, TmdbConfig};
use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::services::{SavedMovieQuery, SavedMovieToggle, SearchCountTracker, TrendingQuery};
use crate::store::{AppwriteConfig, AppwriteStore, RowStore};

/// Build an HTTP client with reasonable defaults for API calls.
fn build_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))
}

/// Everything a command needs, wired from one `Config`.
pub struct AppState {
    pub config: Config,

    pub tmdb: TmdbClient,

    pub search_counts: SearchCountTracker,

    pub saved_toggle: SavedMovieToggle,

    pub saved_movies: SavedMovieQuery,

    pub trending: TrendingQuery,
}

impl AppState {
    /// Connects to the configured row store.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let http = build_http_client(config.store.request_timeout_seconds)?;
        let store = AppwriteStore::new(
            http,
            AppwriteConfig {
                endpoint: config.store.endpoint.clone(),
                project_id: config.store.project_id.clone(),
                api_key: config.store.api_key.clone(),
                database_id: config.store.database_id.clone(),
            },
        )?;

        Self::with_store(config, Arc::new(store))
    }

    /// Wires services over an explicit store.
    pub fn with_store(config: Config, store: Arc<dyn RowStore>) -> anyhow::Result<Self> {
        let tmdb_http = build_http_client(config.tmdb.request_timeout_seconds)?;
        let tmdb = TmdbClient::new(
            tmdb_http,
            TmdbConfig {
                base_url: config.tmdb.base_url.clone(),
                api_key: config.tmdb.api_key.clone(),
            },
        );

        let image_base = config.tmdb.image_base_url.clone();

        Ok(Self {
            search_counts: SearchCountTracker::new(
                Arc::clone(&store),
                config.store.search_table_id.clone(),
                image_base.clone(),
            ),
            saved_toggle: SavedMovieToggle::new(
                Arc::clone(&store),
                config.store.saved_table_id.clone(),
                image_base,
            ),
            saved_movies: SavedMovieQuery::new(
                Arc::clone(&store),
                config.store.saved_table_id.clone(),
            ),
            trending: TrendingQuery::new(store, config.store.search_table_id.clone()),
            tmdb,
            config,
        })
    }
}
