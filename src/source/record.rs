//! Conversion between untyped backend rows and typed records.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{DashboardError, DashboardResult};

use super::{Row, Table};

/// A typed record stored in one of the backend tables.
pub trait Record: Serialize + DeserializeOwned {
    /// The table rows of this type live in.
    const TABLE: Table;

    /// Checks invariants serde cannot express.
    fn validate(&self) -> DashboardResult<()> {
        Ok(())
    }
}

/// Decodes and validates a single row.
pub fn decode_row<T: Record>(row: Row) -> DashboardResult<T> {
    let record: T =
        serde_json::from_value(Value::Object(row)).map_err(|e| DashboardError::InvalidRecord {
            table: T::TABLE.to_string(),
            message: e.to_string(),
        })?;
    record.validate()?;
    Ok(record)
}

/// Decodes a batch of rows, dropping the ones that fail validation.
///
/// Order of the surviving records matches the input order.
pub fn decode_rows<T: Record>(rows: Vec<Row>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match decode_row::<T>(row) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(table = %T::TABLE, error = %error, "Dropping invalid row");
                None
            }
        })
        .collect()
}

/// Serializes a value into a row for insert or update.
pub fn encode_row<T: Serialize>(table: Table, value: &T) -> DashboardResult<Row> {
    match serde_json::to_value(value) {
        Ok(Value::Object(row)) => Ok(row),
        Ok(other) => Err(DashboardError::InvalidRecord {
            table: table.to_string(),
            message: format!("expected an object, got {}", other),
        }),
        Err(e) => Err(DashboardError::InvalidRecord {
            table: table.to_string(),
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Note {
        title: String,
        pages: u32,
    }

    impl Record for Note {
        const TABLE: Table = Table::Contacts;

        fn validate(&self) -> DashboardResult<()> {
            if self.pages == 0 {
                return Err(DashboardError::InvalidRecord {
                    table: Self::TABLE.to_string(),
                    message: "empty note".to_string(),
                });
            }
            Ok(())
        }
    }

    fn row(value: Value) -> Row {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_decode_row_reports_table_on_shape_error() {
        let result = decode_row::<Note>(row(json!({"title": "a"})));

        match result {
            Err(DashboardError::InvalidRecord { table, message }) => {
                assert_eq!(table, "contacts");
                assert!(message.contains("pages"));
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_row_runs_validation() {
        let result = decode_row::<Note>(row(json!({"title": "a", "pages": 0})));
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rows_drops_invalid_and_keeps_order() {
        let rows = vec![
            row(json!({"title": "first", "pages": 1})),
            row(json!({"title": "broken"})),
            row(json!({"title": "empty", "pages": 0})),
            row(json!({"title": "second", "pages": 2})),
        ];

        let notes: Vec<Note> = decode_rows(rows);

        let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_encode_row_produces_object() {
        let note = Note {
            title: "hello".to_string(),
            pages: 3,
        };

        let encoded = encode_row(Table::Contacts, &note).unwrap();
        assert_eq!(encoded.get("pages"), Some(&json!(3)));
    }

    #[test]
    fn test_encode_row_rejects_non_object() {
        let result = encode_row(Table::Contacts, &42);
        assert!(result.is_err());
    }
}
