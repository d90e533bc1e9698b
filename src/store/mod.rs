//! Remote row store abstraction.
//!
//! A table-oriented service exposing list/create/update/delete of rows, with
//! list filtering by equality and ordering queries. `AppwriteStore` talks to
//! the hosted service; `MemoryRowStore` keeps rows in process.

pub mod appwrite;
pub mod memory;
pub mod query;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::RowId;

pub use appwrite::{AppwriteConfig, AppwriteStore};
pub use memory::MemoryRowStore;
pub use query::Query;

/// A stored row: system id and timestamps plus the user columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "$id")]
    pub id: RowId,

    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "$updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Row {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.data.get(column)
    }
}

/// Result of a list call. `total` counts every matching row, not only the
/// ones returned after a limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowList {
    pub total: u64,
    pub rows: Vec<Row>,
}

impl RowList {
    #[must_use]
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Row not found: {0}")]
    NotFound(RowId),

    #[error("Failed to decode row {row}: {message}")]
    Decode { row: RowId, message: String },

    #[error("Failed to encode row data: {0}")]
    Encode(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Store misconfigured: {0}")]
    Config(String),
}

impl StoreError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[async_trait]
pub trait RowStore: Send + Sync {
    /// Lists rows of `table` matching every query.
    async fn list_rows(&self, table: &str, queries: &[Query]) -> Result<RowList, StoreError>;

    /// Creates a row with a caller-chosen id.
    async fn create_row(
        &self,
        table: &str,
        id: &RowId,
        data: Map<String, Value>,
    ) -> Result<Row, StoreError>;

    /// Merges `patch` into an existing row.
    async fn update_row(
        &self,
        table: &str,
        id: &RowId,
        patch: Map<String, Value>,
    ) -> Result<Row, StoreError>;

    async fn delete_row(&self, table: &str, id: &RowId) -> Result<(), StoreError>;
}
