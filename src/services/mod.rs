pub mod locks;
pub mod saved;
pub mod search_count;
pub mod trending;

pub use locks::KeyedLocks;
pub use saved::{SavedMovieQuery, SavedMovieToggle};
pub use search_count::SearchCountTracker;
pub use trending::TrendingQuery;

use serde_json::Value;
use tracing::warn;

use crate::cancel::CancelSignal;
use crate::store::{Query, Row, RowList, RowStore, StoreError};

/// Lists the rows of `table` whose `column` equals `value`.
pub(crate) async fn find_by(
    store: &dyn RowStore,
    table: &str,
    column: &str,
    value: impl Into<Value>,
    signal: &CancelSignal,
) -> Result<RowList, StoreError> {
    let queries = [Query::equal(column, value)];
    signal.run(store.list_rows(table, &queries)).await
}

/// Decodes every row, dropping (and logging) the ones that do not fit `T`.
pub(crate) fn decode_rows<T>(table: &str, rows: &[Row]) -> Vec<T>
where
    for<'a> T: TryFrom<&'a Row, Error = StoreError>,
{
    rows.iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(table, row_id = %row.id, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}
