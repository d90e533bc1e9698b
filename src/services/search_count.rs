//! Search popularity tracking.
//!
//! Each matched search bumps a counter on the row keyed by the search term,
//! creating the row on first use. The trending list ranks these rows.

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::cancel::CancelSignal;
use crate::constants::fields;
use crate::domain::RowId;
use crate::models::Movie;
use crate::models::records::{SearchRecordData, to_columns};
use crate::services::{KeyedLocks, find_by};
use crate::store::{RowStore, StoreError};

pub struct SearchCountTracker {
    store: Arc<dyn RowStore>,
    table: String,
    image_base_url: String,
    locks: KeyedLocks<String>,
}

impl SearchCountTracker {
    pub fn new(
        store: Arc<dyn RowStore>,
        table: impl Into<String>,
        image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            table: table.into(),
            image_base_url: image_base_url.into(),
            locks: KeyedLocks::new(),
        }
    }

    /// Records that `query` matched `movie`.
    ///
    /// Increments the existing row for the term, or creates it with a count
    /// of one. A blank query is ignored. Store errors are logged and
    /// returned unchanged.
    pub async fn record_search(&self, query: &str, movie: &Movie) -> Result<(), StoreError> {
        self.record_search_cancellable(query, movie, &CancelSignal::new())
            .await
    }

    pub async fn record_search_cancellable(
        &self,
        query: &str,
        movie: &Movie,
        signal: &CancelSignal,
    ) -> Result<(), StoreError> {
        if query.trim().is_empty() {
            debug!("Ignoring blank search term");
            return Ok(());
        }

        let result = self.upsert(query, movie, signal).await;

        if let Err(e) = &result {
            error!(search_term = query, movie_id = %movie.id, error = %e, "Failed to record search");
        }

        result
    }

    async fn upsert(
        &self,
        query: &str,
        movie: &Movie,
        signal: &CancelSignal,
    ) -> Result<(), StoreError> {
        let _guard = self.locks.lock(query.to_string()).await;

        let existing = find_by(
            self.store.as_ref(),
            &self.table,
            fields::SEARCH_TERM,
            query,
            signal,
        )
        .await?;

        signal.checkpoint()?;

        if let Some(row) = existing.first() {
            if existing.total > 1 {
                warn!(
                    search_term = query,
                    duplicates = existing.total,
                    "Multiple rows for search term, updating the first"
                );
            }

            let count = row
                .get(fields::COUNT)
                .and_then(Value::as_i64)
                .unwrap_or(0)
                + 1;

            let mut patch = Map::new();
            patch.insert(fields::COUNT.to_string(), Value::from(count));

            signal
                .run(self.store.update_row(&self.table, &row.id, patch))
                .await?;

            debug!(search_term = query, count, "Search count incremented");
        } else {
            let data = to_columns(&SearchRecordData::first_match(
                query,
                movie,
                &self.image_base_url,
            ))?;
            let id = RowId::unique();

            signal
                .run(self.store.create_row(&self.table, &id, data))
                .await?;

            debug!(search_term = query, row_id = %id, "Search term recorded");
        }

        Ok(())
    }
}
