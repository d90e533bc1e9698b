//! In-process `RowStore`.
//!
//! Rows are kept per table in insertion order, which is the "store order"
//! that breaks ties when sorting. Latency and outages can be injected so
//! callers can exercise interleavings and failure paths.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::RowId;
use crate::store::query::apply;
use crate::store::{Query, Row, RowList, RowStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryRowStore {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    latency: Duration,
    unavailable: AtomicBool,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl MemoryRowStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every operation by `latency` before it touches the tables.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// While set, every operation fails with a 503.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    #[must_use]
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Snapshot of a table's rows in store order.
    pub async fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .lock()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Inserts a row directly, bypassing counters and outage injection.
    pub async fn seed(&self, table: &str, id: &str, data: Map<String, Value>) {
        let now = chrono::Utc::now();
        self.tables
            .lock()
            .await
            .entry(table.to_string())
            .or_default()
            .push(Row {
                id: RowId::new(id),
                created_at: Some(now),
                updated_at: Some(now),
                data,
            });
    }

    async fn enter(&self, counter: &AtomicU64) -> Result<(), StoreError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }

        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl RowStore for MemoryRowStore {
    async fn list_rows(&self, table: &str, queries: &[Query]) -> Result<RowList, StoreError> {
        self.enter(&self.reads).await?;

        let tables = self.tables.lock().await;
        let rows = tables.get(table).map(Vec::as_slice).unwrap_or_default();
        let (total, rows) = apply(rows, queries);

        Ok(RowList { total, rows })
    }

    async fn create_row(
        &self,
        table: &str,
        id: &RowId,
        data: Map<String, Value>,
    ) -> Result<Row, StoreError> {
        self.enter(&self.writes).await?;

        let mut tables = self.tables.lock().await;
        let rows = tables.entry(table.to_string()).or_default();

        if rows.iter().any(|r| &r.id == id) {
            return Err(StoreError::Api {
                status: 409,
                message: format!("Row with the requested ID '{id}' already exists"),
            });
        }

        let now = chrono::Utc::now();
        let row = Row {
            id: id.clone(),
            created_at: Some(now),
            updated_at: Some(now),
            data,
        };
        rows.push(row.clone());

        Ok(row)
    }

    async fn update_row(
        &self,
        table: &str,
        id: &RowId,
        patch: Map<String, Value>,
    ) -> Result<Row, StoreError> {
        self.enter(&self.writes).await?;

        let mut tables = self.tables.lock().await;
        let row = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| &r.id == id))
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        row.data.extend(patch);
        row.updated_at = Some(chrono::Utc::now());

        Ok(row.clone())
    }

    async fn delete_row(&self, table: &str, id: &RowId) -> Result<(), StoreError> {
        self.enter(&self.writes).await?;

        let mut tables = self.tables.lock().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let index = rows
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        rows.remove(index);

        Ok(())
    }
}
