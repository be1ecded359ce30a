//! Loosely typed table configuration
//!
//! [`TableConfig`] is the boundary through which readers hand decoded but
//! not yet validated values to the data model. Every recognized option is
//! optional; [`TableConfig::build`] runs each field's validator and either
//! produces a [`BiomTable`] or reports the first violation. The reverse
//! direction, [`TableConfig::from_table`], reads a table back into wire
//! values for writers.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use biom_core::{
    BiomError, BiomTable, ElementType, MatrixData, MatrixType, Result, Shape, SparseEntry,
    TableType,
};

/// Recognized construction options for a BIOM table, all optional
///
/// Deserializes directly from a JSON object; unknown keys are rejected.
/// Field values stay as [`Value`]s until [`build`](Self::build) validates
/// them, so a malformed document is representable here and rejected there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Table identifier; null and absent both mean no identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Format descriptor text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
    /// Format reference URL text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_url: Option<Value>,
    /// Member of the table type vocabulary
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub table_type: Option<Value>,
    /// Producer identifier text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<Value>,
    /// Creation timestamp text; absent means "stamp now"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    /// Row descriptor sequence, elements stored opaquely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Value>,
    /// Column descriptor sequence, elements stored opaquely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Value>,
    /// Member of the matrix type vocabulary; selects the `data` encoding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix_type: Option<Value>,
    /// Member of the element type vocabulary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix_element_type: Option<Value>,
    /// Pair of non-negative dimensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Value>,
    /// Matrix payload in the encoding named by `matrix_type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Free-form comment; null and absent both mean no comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Value>,
}

impl TableConfig {
    /// Validate every supplied field and construct the table
    ///
    /// Fields are validated in a fixed internal order and the first
    /// violation propagates; callers must not rely on which of several
    /// violations is reported. Unset fields take the documented defaults.
    pub fn build(self) -> Result<BiomTable> {
        let mut builder = BiomTable::builder();

        if let Some(id) = optional_text("id", self.id)? {
            builder = builder.id(id);
        }
        if let Some(format) = self.format {
            builder = builder.format(text("format", format)?);
        }
        if let Some(format_url) = self.format_url {
            builder = builder.format_url(text("format_url", format_url)?);
        }
        if let Some(table_type) = self.table_type {
            builder = builder.table_type(text("type", table_type)?.parse::<TableType>()?);
        }
        if let Some(generated_by) = self.generated_by {
            builder = builder.generated_by(text("generated_by", generated_by)?);
        }
        match self.date {
            // absent and null are the "stamp now" sentinel, left to the builder
            None | Some(Value::Null) => {}
            Some(date) => builder = builder.date(text("date", date)?),
        }
        if let Some(rows) = self.rows {
            builder = builder.rows(sequence("rows", rows)?);
        }
        if let Some(columns) = self.columns {
            builder = builder.columns(sequence("columns", columns)?);
        }
        let matrix_type = match self.matrix_type {
            Some(matrix_type) => text("matrix_type", matrix_type)?.parse::<MatrixType>()?,
            None => MatrixType::default(),
        };
        if let Some(element_type) = self.matrix_element_type {
            builder = builder
                .element_type(text("matrix_element_type", element_type)?.parse::<ElementType>()?);
        }
        if let Some(shape) = self.shape {
            builder = builder.shape(decode_shape(shape)?);
        }
        builder = builder.data(decode_data(matrix_type, self.data)?);
        if let Some(comment) = optional_text("comment", self.comment)? {
            builder = builder.comment(comment);
        }

        Ok(builder.build())
    }

    /// Read every field of a table back into wire values
    ///
    /// Always-present fields come back as `Some`; an absent `id` or
    /// `comment` stays `None`, so a config built from a table reproduces
    /// the table when rebuilt.
    pub fn from_table(table: &BiomTable) -> Self {
        TableConfig {
            id: table.id().map(Value::from),
            format: Some(Value::from(table.format())),
            format_url: Some(Value::from(table.format_url())),
            table_type: Some(Value::from(table.table_type().as_str())),
            generated_by: Some(Value::from(table.generated_by())),
            date: Some(Value::from(table.date())),
            rows: Some(Value::Array(table.rows().to_vec())),
            columns: Some(Value::Array(table.columns().to_vec())),
            matrix_type: Some(Value::from(table.matrix_type().as_str())),
            matrix_element_type: Some(Value::from(table.element_type().as_str())),
            shape: Some(json!([table.shape().rows, table.shape().cols])),
            data: Some(encode_data(table.data())),
            comment: table.comment().map(Value::from),
        }
    }
}

/// Require a textual value
pub(crate) fn text(field: &'static str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(BiomError::TypeMismatch {
            field,
            expected: "a string",
        }),
    }
}

/// Require a textual value or the absent marker (null / unset)
pub(crate) fn optional_text(field: &'static str, value: Option<Value>) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(BiomError::TypeMismatch {
            field,
            expected: "a string or null",
        }),
    }
}

/// Require a sequence value
pub(crate) fn sequence(field: &'static str, value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(BiomError::TypeMismatch {
            field,
            expected: "a sequence",
        }),
    }
}

/// Validate a wire value as a shape pair
pub(crate) fn decode_shape(value: Value) -> Result<Shape> {
    let items = sequence("shape", value)?;
    if items.len() != 2 {
        return Err(BiomError::ArityViolation {
            field: "shape",
            expected: 2,
            actual: items.len(),
        });
    }
    let mut pair = [0i64; 2];
    for (slot, item) in pair.iter_mut().zip(&items) {
        *slot = item.as_i64().ok_or(BiomError::DomainViolation {
            field: "shape",
            reason: "non-integer component",
        })?;
    }
    Shape::from_seq(&pair)
}

/// Decode a wire payload under the given encoding
///
/// The encoding tag of the result always matches `matrix_type`; entries
/// that cannot decode under that encoding are a type mismatch on `data`.
/// Nothing is checked against any shape.
pub(crate) fn decode_data(matrix_type: MatrixType, value: Option<Value>) -> Result<MatrixData> {
    let value = match value {
        None | Some(Value::Null) => return Ok(MatrixData::empty(matrix_type)),
        Some(value) => value,
    };
    let items = sequence("data", value)?;

    match matrix_type {
        MatrixType::Sparse => {
            let mut entries = Vec::with_capacity(items.len());
            for item in items {
                entries.push(decode_triple(item)?);
            }
            Ok(MatrixData::Sparse(entries))
        }
        MatrixType::Dense => {
            let mut rows = Vec::with_capacity(items.len());
            for item in items {
                rows.push(decode_dense_row(item)?);
            }
            Ok(MatrixData::Dense(rows))
        }
    }
}

fn decode_triple(item: Value) -> Result<SparseEntry> {
    const EXPECTED: BiomError = BiomError::TypeMismatch {
        field: "data",
        expected: "[row, column, value] triples",
    };

    let Value::Array(triple) = item else {
        return Err(EXPECTED);
    };
    let [row, col, value] = triple.as_slice() else {
        return Err(EXPECTED);
    };
    Ok(SparseEntry::new(
        row.as_u64().ok_or(EXPECTED)? as usize,
        col.as_u64().ok_or(EXPECTED)? as usize,
        value.as_f64().ok_or(EXPECTED)?,
    ))
}

fn decode_dense_row(item: Value) -> Result<Vec<f64>> {
    const EXPECTED: BiomError = BiomError::TypeMismatch {
        field: "data",
        expected: "rows of numbers",
    };

    let Value::Array(values) = item else {
        return Err(EXPECTED);
    };
    values
        .iter()
        .map(|value| value.as_f64().ok_or(EXPECTED))
        .collect()
}

/// Encode a payload back into its wire form
pub(crate) fn encode_data(data: &MatrixData) -> Value {
    match data {
        MatrixData::Sparse(entries) => Value::Array(
            entries
                .iter()
                .map(|e| json!([e.row, e.col, e.value]))
                .collect(),
        ),
        MatrixData::Dense(rows) => json!(rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biom_core::ErrorKind;
    use serde_json::json;

    fn config(value: Value) -> TableConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_config_builds_the_default_table() {
        let table = TableConfig::default().build().unwrap();
        assert_eq!(table.table_type(), TableType::Otu);
        assert_eq!(table.matrix_type(), MatrixType::Sparse);
        assert_eq!(table.shape(), Shape::new(0, 0));
        assert!(table.rows().is_empty());
        assert!(table.data().is_empty());
        assert!(!table.date().is_empty());
    }

    #[test]
    fn explicit_values_survive_construction_verbatim() {
        let table = config(json!({
            "id": "table-1",
            "type": "Gene table",
            "generated_by": "test suite",
            "date": "2011-12-19T19:00:00",
            "rows": [{"id": "O1", "metadata": null}],
            "columns": [{"id": "S1"}, {"id": "S2"}, {"id": "S3"}],
            "matrix_type": "sparse",
            "matrix_element_type": "int",
            "shape": [1, 3],
            "data": [[0, 1, 5.0]],
            "comment": "fixture",
        }))
        .build()
        .unwrap();

        assert_eq!(table.id(), Some("table-1"));
        assert_eq!(table.table_type(), TableType::Gene);
        assert_eq!(table.generated_by(), "test suite");
        assert_eq!(table.date(), "2011-12-19T19:00:00");
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.columns().len(), 3);
        assert_eq!(table.element_type(), ElementType::Int);
        assert_eq!(table.shape(), Shape::new(1, 3));
        assert_eq!(
            table.data(),
            &MatrixData::Sparse(vec![SparseEntry::new(0, 1, 5.0)])
        );
        assert_eq!(table.comment(), Some("fixture"));
    }

    #[test]
    fn sparse_payload_is_stored_as_ordered_triples() {
        let table = config(json!({
            "matrix_type": "sparse",
            "data": [[0, 1, 5.0], [1, 2, 3.0]],
        }))
        .build()
        .unwrap();

        assert_eq!(
            table.data(),
            &MatrixData::Sparse(vec![
                SparseEntry::new(0, 1, 5.0),
                SparseEntry::new(1, 2, 3.0),
            ])
        );
    }

    #[test]
    fn dense_payload_is_stored_row_by_row() {
        let table = config(json!({
            "matrix_type": "dense",
            "data": [[1.0, 0.0], [0.0, 4.0]],
        }))
        .build()
        .unwrap();

        assert_eq!(table.matrix_type(), MatrixType::Dense);
        assert_eq!(
            table.data(),
            &MatrixData::Dense(vec![vec![1.0, 0.0], vec![0.0, 4.0]])
        );
    }

    #[test]
    fn non_textual_id_is_a_type_mismatch() {
        let err = config(json!({"id": 42})).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.field(), Some("id"));
    }

    #[test]
    fn null_id_means_absent() {
        let table = config(json!({"id": null})).build().unwrap();
        assert_eq!(table.id(), None);
    }

    #[test]
    fn out_of_vocabulary_type_is_rejected() {
        let err = config(json!({"type": "Invalid table"})).build().unwrap_err();
        assert_eq!(
            err,
            BiomError::VocabularyViolation {
                field: "type",
                value: "Invalid table".to_owned(),
            }
        );
    }

    #[test]
    fn non_textual_type_is_a_type_mismatch_not_a_vocabulary_violation() {
        let err = config(json!({"type": 7})).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn shape_errors_follow_the_taxonomy() {
        assert_eq!(
            config(json!({"shape": [2, 3]})).build().unwrap().shape(),
            Shape::new(2, 3)
        );

        let err = config(json!({"shape": [2, -1]})).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DomainViolation);

        let err = config(json!({"shape": [2]})).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArityViolation);

        let err = config(json!({"shape": [2, 1.5]})).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DomainViolation);

        let err = config(json!({"shape": "2x3"})).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn non_sequence_rows_are_a_type_mismatch() {
        let err = config(json!({"rows": "O1"})).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.field(), Some("rows"));
    }

    #[test]
    fn row_descriptors_are_not_validated_per_element() {
        // arbitrary descriptor shapes pass through untouched
        let table = config(json!({"rows": [1, "two", {"anything": true}]}))
            .build()
            .unwrap();
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[1], json!("two"));
    }

    #[test]
    fn malformed_sparse_entries_are_rejected() {
        let err = config(json!({"data": [[0, 1]]})).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.field(), Some("data"));

        let err = config(json!({"data": [[0, -1, 5.0]]})).build().unwrap_err();
        assert_eq!(err.field(), Some("data"));
    }

    #[test]
    fn dense_rows_may_disagree_with_shape() {
        // cross-field rules are not enforced at construction
        let table = config(json!({
            "matrix_type": "dense",
            "shape": [5, 5],
            "data": [[1.0]],
        }))
        .build()
        .unwrap();
        assert_eq!(table.shape(), Shape::new(5, 5));
        assert!(table.check_consistency().is_err());
    }

    #[test]
    fn unknown_keys_are_rejected_at_deserialization() {
        let result: std::result::Result<TableConfig, _> =
            serde_json::from_value(json!({"shap": [2, 2]}));
        assert!(result.is_err());
    }

    #[test]
    fn config_round_trips_through_a_table() {
        let original = config(json!({
            "id": "rt",
            "format": "Biological Observation Matrix 1.0.0",
            "format_url": "http://biom-format.org",
            "type": "Taxon table",
            "generated_by": "round trip",
            "date": "2024-01-01T00:00:00Z",
            "rows": [{"id": "O1"}],
            "columns": [{"id": "S1"}, {"id": "S2"}],
            "matrix_type": "sparse",
            "matrix_element_type": "float",
            "shape": [1, 2],
            "data": [[0, 0, 2.5]],
            "comment": "kept",
        }));

        let table = original.clone().build().unwrap();
        assert_eq!(TableConfig::from_table(&table), original);
    }

    #[test]
    fn absent_fields_read_back_as_defaults() {
        let table = TableConfig::default().build().unwrap();
        let read_back = TableConfig::from_table(&table);

        assert_eq!(read_back.id, None);
        assert_eq!(read_back.comment, None);
        assert_eq!(read_back.format, Some(json!(BiomTable::FORMAT)));
        assert_eq!(read_back.table_type, Some(json!("OTU table")));
        assert_eq!(read_back.matrix_type, Some(json!("sparse")));
        assert_eq!(read_back.shape, Some(json!([0, 0])));
        assert_eq!(read_back.data, Some(json!([])));
    }
}
