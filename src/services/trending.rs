use std::sync::Arc;
use tracing::error;

use crate::cancel::CancelSignal;
use crate::constants::{fields, limits};
use crate::models::SearchRecord;
use crate::services::decode_rows;
use crate::store::{Query, RowStore, StoreError};

/// Most searched terms, highest count first.
pub struct TrendingQuery {
    store: Arc<dyn RowStore>,
    table: String,
}

impl TrendingQuery {
    pub fn new(store: Arc<dyn RowStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Up to five records by descending count. Ties keep store order.
    ///
    /// Returns `None` when the store could not be read.
    pub async fn list_trending(&self) -> Option<Vec<SearchRecord>> {
        self.list_trending_cancellable(&CancelSignal::new()).await
    }

    pub async fn list_trending_cancellable(&self, signal: &CancelSignal) -> Option<Vec<SearchRecord>> {
        match self.fetch(signal).await {
            Ok(records) => Some(records),
            Err(e) => {
                error!(table = %self.table, error = %e, "Failed to load trending searches");
                None
            }
        }
    }

    async fn fetch(&self, signal: &CancelSignal) -> Result<Vec<SearchRecord>, StoreError> {
        let queries = [
            Query::limit(limits::TRENDING_LIMIT),
            Query::order_desc(fields::COUNT),
        ];

        let list = signal.run(self.store.list_rows(&self.table, &queries)).await?;
        let mut records: Vec<SearchRecord> = decode_rows(&self.table, &list.rows);
        records.truncate(limits::TRENDING_LIMIT as usize);

        Ok(records)
    }
}
