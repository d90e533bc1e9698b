use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::domain::MovieId;
use crate::models::{Movie, MovieSummary};

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub base_url: String,

    /// v4 read access token, sent as a bearer token.
    pub api_key: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PagedResponse<T> {
    results: Vec<T>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    #[must_use]
    pub const fn new(client: Client, config: TmdbConfig) -> Self {
        Self { client, config }
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Searches by title, or lists popular movies when `query` is empty.
    pub async fn fetch_movies(&self, query: &str) -> Result<Vec<MovieSummary>> {
        let query = query.trim();
        let url = if query.is_empty() {
            format!("{}/discover/movie?sort_by=popularity.desc", self.base())
        } else {
            format!(
                "{}/search/movie?query={}",
                self.base(),
                urlencoding::encode(query)
            )
        };

        debug!(url = %url, "Fetching movies");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .header("accept", "application/json")
            .send()
            .await
            .context("Failed to reach TMDB")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        let page: PagedResponse<MovieSummary> = response.json().await?;
        Ok(page.results)
    }

    pub async fn fetch_movie_details(&self, id: MovieId) -> Result<Option<Movie>> {
        let url = format!("{}/movie/{}", self.base(), id);

        debug!(url = %url, "Fetching movie details");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .header("accept", "application/json")
            .send()
            .await
            .context("Failed to reach TMDB")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        let movie: Movie = response.json().await?;
        Ok(Some(movie))
    }
}
