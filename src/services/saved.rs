//! Saved movies.
//!
//! A movie is saved exactly when a row with its id exists in the saved
//! table; there is no soft-delete flag.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::cancel::CancelSignal;
use crate::constants::{fields, limits};
use crate::domain::{MovieId, RowId};
use crate::models::records::{SavedRecordData, to_columns};
use crate::models::{Movie, SavedRecord};
use crate::services::{KeyedLocks, decode_rows, find_by};
use crate::store::{Query, RowStore, StoreError};

pub struct SavedMovieToggle {
    store: Arc<dyn RowStore>,
    table: String,
    image_base_url: String,
    locks: KeyedLocks<MovieId>,
}

impl SavedMovieToggle {
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

    /// Flips the saved state of `movie_id` and returns the new state.
    pub async fn toggle_saved(&self, movie_id: MovieId, movie: &Movie) -> Result<bool, StoreError> {
        self.toggle_saved_cancellable(movie_id, movie, &CancelSignal::new())
            .await
    }

    pub async fn toggle_saved_cancellable(
        &self,
        movie_id: MovieId,
        movie: &Movie,
        signal: &CancelSignal,
    ) -> Result<bool, StoreError> {
        let result = self.toggle(movie_id, movie, signal).await;

        match &result {
            Ok(saved) => debug!(%movie_id, saved, "Saved state toggled"),
            Err(e) => error!(%movie_id, error = %e, "Failed to toggle saved state"),
        }

        result
    }

    async fn toggle(
        &self,
        movie_id: MovieId,
        movie: &Movie,
        signal: &CancelSignal,
    ) -> Result<bool, StoreError> {
        let _guard = self.locks.lock(movie_id).await;

        let existing = find_by(
            self.store.as_ref(),
            &self.table,
            fields::MOVIE_ID,
            movie_id.value(),
            signal,
        )
        .await?;

        signal.checkpoint()?;

        let Some(row) = existing.first() else {
            let data = to_columns(&SavedRecordData::for_movie(
                movie_id,
                movie,
                &self.image_base_url,
            ))?;

            signal
                .run(self.store.create_row(&self.table, &RowId::unique(), data))
                .await?;

            return Ok(true);
        };

        if existing.total > 1 {
            warn!(
                %movie_id,
                duplicates = existing.total,
                "Multiple saved rows for movie, removing the first"
            );
        }

        match signal.run(self.store.delete_row(&self.table, &row.id)).await {
            Ok(()) => Ok(false),
            // Someone else removed it between our read and our delete.
            Err(StoreError::NotFound(id)) => {
                warn!(%movie_id, row_id = %id, "Saved row vanished before delete");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

/// Read-only views over the saved table.
pub struct SavedMovieQuery {
    store: Arc<dyn RowStore>,
    table: String,
}

impl SavedMovieQuery {
    pub fn new(store: Arc<dyn RowStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Whether any saved row exists for `movie_id`. Never cached.
    pub async fn is_saved(&self, movie_id: MovieId) -> Result<bool, StoreError> {
        self.is_saved_cancellable(movie_id, &CancelSignal::new())
            .await
    }

    pub async fn is_saved_cancellable(
        &self,
        movie_id: MovieId,
        signal: &CancelSignal,
    ) -> Result<bool, StoreError> {
        let rows = find_by(
            self.store.as_ref(),
            &self.table,
            fields::MOVIE_ID,
            movie_id.value(),
            signal,
        )
        .await?;

        Ok(rows.total > 0)
    }

    /// All saved movies in store order, or `None` when the store could not
    /// be read.
    pub async fn list_saved(&self) -> Option<Vec<SavedRecord>> {
        self.list_saved_cancellable(&CancelSignal::new()).await
    }

    pub async fn list_saved_cancellable(&self, signal: &CancelSignal) -> Option<Vec<SavedRecord>> {
        let queries = [Query::limit(limits::SAVED_LIST_LIMIT)];

        match signal.run(self.store.list_rows(&self.table, &queries)).await {
            Ok(list) => Some(decode_rows(&self.table, &list.rows)),
            Err(e) => {
                error!(table = %self.table, error = %e, "Failed to list saved movies");
                None
            }
        }
    }
}
