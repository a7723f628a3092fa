use crate::api::reports::Report;
use crate::error::ResponseError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Pulls the report's records out of a parsed response body. Most reports
/// nest an array of objects under their result key; the metric-style
/// reports (domain_rating, metrics, subscription_info) nest a single
/// object, which becomes a one-record set.
pub fn extract_records(
    tree: &Value,
    report: Report,
) -> Result<Vec<Map<String, Value>>, ResponseError> {
    let key = report.result_key();
    let section = tree.get(key).ok_or_else(|| ResponseError::MissingKey {
        key: key.to_string(),
    })?;

    match section {
        Value::Array(entries) => entries
            .iter()
            .map(|entry| match entry {
                Value::Object(record) => Ok(record.clone()),
                _ => Err(ResponseError::UnexpectedShape {
                    key: key.to_string(),
                }),
            })
            .collect(),
        Value::Object(record) => Ok(vec![record.clone()]),
        _ => Err(ResponseError::UnexpectedShape {
            key: key.to_string(),
        }),
    }
}

/// Flattened report records. Records are heterogeneous, so the columns are
/// the union of every key observed across the set and rows are padded with
/// `Null` where a record lacks a key. A missing key is never an error here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|column| column == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        ResultTable { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
