use serde_json::Value;

/// A named predicate-and-extractor pair. APIs wrap their record lists in
/// different envelopes; each matcher recognizes one of them.
pub struct ShapeMatcher {
    pub name: &'static str,
    extract: fn(&Value) -> Option<Vec<Value>>,
}

/// Tried in order, first match wins. The final matcher accepts any object,
/// so only non-object scalars fall through to an empty record list.
pub const SHAPE_MATCHERS: &[ShapeMatcher] = &[
    ShapeMatcher {
        name: "top-level list",
        extract: top_level_list,
    },
    ShapeMatcher {
        name: "list under 'data'",
        extract: |value| list_under_key(value, "data"),
    },
    ShapeMatcher {
        name: "list under 'results'",
        extract: |value| list_under_key(value, "results"),
    },
    ShapeMatcher {
        name: "single object",
        extract: single_object,
    },
];

fn top_level_list(value: &Value) -> Option<Vec<Value>> {
    value.as_array().cloned()
}

fn list_under_key(value: &Value, key: &str) -> Option<Vec<Value>> {
    value.as_object()?.get(key)?.as_array().cloned()
}

fn single_object(value: &Value) -> Option<Vec<Value>> {
    value.as_object().map(|_| vec![value.clone()])
}

/// Locates the record list inside a variably-shaped response.
pub fn resolve_records(value: &Value) -> Vec<Value> {
    for matcher in SHAPE_MATCHERS {
        if let Some(records) = (matcher.extract)(value) {
            tracing::debug!(
                shape = matcher.name,
                records = records.len(),
                "resolved response shape"
            );
            return records;
        }
    }
    Vec::new()
}

/// Records reshaped into columns and rows, ready for a tabular sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Unions the keys of every record into the column set, in first-seen
    /// order. A key a record lacks becomes a blank cell. Records that are
    /// not objects contribute no columns and an all-blank row; heterogeneous
    /// shapes are tolerated rather than rejected.
    pub fn from_records(records: &[Value]) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            if let Some(obj) = record.as_object() {
                for key in obj.keys() {
                    if !columns.iter().any(|col| col == key) {
                        columns.push(key.clone());
                    }
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|col| record.get(col).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Table { columns, rows }
    }
}
