use serde_json::{Value, json};
use std::cmp::Ordering;

use crate::domain::SortOrder;
use crate::store::Row;

/// A list filter understood by the row store.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal { attribute: String, values: Vec<Value> },
    Order { attribute: String, order: SortOrder },
    Limit(u32),
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equal {
            attribute: attribute.into(),
            values: vec![value.into()],
        }
    }

    pub fn order_asc(attribute: impl Into<String>) -> Self {
        Self::Order {
            attribute: attribute.into(),
            order: SortOrder::Ascending,
        }
    }

    pub fn order_desc(attribute: impl Into<String>) -> Self {
        Self::Order {
            attribute: attribute.into(),
            order: SortOrder::Descending,
        }
    }

    #[must_use]
    pub const fn limit(limit: u32) -> Self {
        Self::Limit(limit)
    }

    /// Serialized form sent as a `queries[]` parameter.
    #[must_use]
    pub fn to_wire(&self) -> String {
        let value = match self {
            Self::Equal { attribute, values } => json!({
                "method": "equal",
                "attribute": attribute,
                "values": values,
            }),
            Self::Order { attribute, order } => json!({
                "method": if order.is_ascending() { "orderAsc" } else { "orderDesc" },
                "attribute": attribute,
            }),
            Self::Limit(limit) => json!({
                "method": "limit",
                "values": [limit],
            }),
        };
        value.to_string()
    }

    /// Whether `row` passes this query. Ordering and limits never filter.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Self::Equal { attribute, values } => row
                .get(attribute)
                .is_some_and(|v| values.iter().any(|want| values_equal(v, want))),
            Self::Order { .. } | Self::Limit(_) => true,
        }
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Orders two column values the way the store sorts them: numbers
/// numerically, strings lexically, missing values first.
#[must_use]
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => Ordering::Equal,
        },
    }
}

/// Applies filters, ordering and limit to `rows`, returning the total match
/// count and the selected page.
#[must_use]
pub fn apply(rows: &[Row], queries: &[Query]) -> (u64, Vec<Row>) {
    let mut selected: Vec<Row> = rows
        .iter()
        .filter(|row| queries.iter().all(|q| q.matches(row)))
        .cloned()
        .collect();

    let total = selected.len() as u64;

    // Stable sorts applied last-to-first give first-order-wins precedence.
    for query in queries.iter().rev() {
        if let Query::Order { attribute, order } = query {
            selected.sort_by(|a, b| {
                let ord = compare_values(a.get(attribute), b.get(attribute));
                if order.is_ascending() { ord } else { ord.reverse() }
            });
        }
    }

    let limit = queries.iter().rev().find_map(|q| match q {
        Query::Limit(n) => Some(*n as usize),
        _ => None,
    });

    if let Some(limit) = limit {
        selected.truncate(limit);
    }

    (total, selected)
}
