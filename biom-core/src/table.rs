//! The validated BIOM table record
//!
//! [`BiomTable`] holds one table's state behind typed fields, so every
//! vocabulary and shape constraint established at construction keeps
//! holding through later reassignment. Construction goes through
//! [`TableBuilder`], which applies the documented default for every field
//! left unset. No cross-field rule (row count versus shape, index bounds)
//! is enforced on assignment; [`BiomTable::check_consistency`] makes those
//! checks available as an explicit operation.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::error::{BiomError, Result};
use crate::matrix::{MatrixData, Shape};
use crate::vocab::{ElementType, MatrixType, TableType};
use crate::MatrixAccess;

/// One complete BIOM table instance
#[derive(Debug, Clone, PartialEq)]
pub struct BiomTable {
    id: Option<String>,
    format: String,
    format_url: String,
    table_type: TableType,
    generated_by: String,
    date: String,
    rows: Vec<Value>,
    columns: Vec<Value>,
    element_type: ElementType,
    shape: Shape,
    data: MatrixData,
    comment: Option<String>,
}

impl BiomTable {
    /// Default `format` identifier
    pub const FORMAT: &'static str = "Biological Observation Matrix 1.0.0";

    /// Default `format_url` identifier
    pub const FORMAT_URL: &'static str = "http://biom-format.org";

    /// Default `generated_by` producer identifier
    pub const GENERATED_BY: &'static str = concat!("BIOM-Format ", env!("CARGO_PKG_VERSION"));

    /// Start building a table; unset fields take their defaults
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Table identifier, if any
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Format descriptor
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Format reference URL text
    pub fn format_url(&self) -> &str {
        &self.format_url
    }

    /// Kind of observation recorded
    pub fn table_type(&self) -> TableType {
        self.table_type
    }

    /// Producer identifier
    pub fn generated_by(&self) -> &str {
        &self.generated_by
    }

    /// Creation timestamp text
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Row (observation) descriptors, in insertion order
    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    /// Column (sample) descriptors, in insertion order
    pub fn columns(&self) -> &[Value] {
        &self.columns
    }

    /// Encoding of the matrix payload, derived from the payload itself
    pub fn matrix_type(&self) -> MatrixType {
        self.data.matrix_type()
    }

    /// Intended interpretation of matrix values
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Logical matrix dimensions
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Matrix payload
    pub fn data(&self) -> &MatrixData {
        &self.data
    }

    /// Free-form comment, if any
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Replace the table identifier
    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    /// Replace the format descriptor
    pub fn set_format(&mut self, format: String) {
        self.format = format;
    }

    /// Replace the format reference URL text
    pub fn set_format_url(&mut self, format_url: String) {
        self.format_url = format_url;
    }

    /// Replace the table type
    pub fn set_table_type(&mut self, table_type: TableType) {
        self.table_type = table_type;
    }

    /// Replace the producer identifier
    pub fn set_generated_by(&mut self, generated_by: String) {
        self.generated_by = generated_by;
    }

    /// Replace the creation timestamp text
    pub fn set_date(&mut self, date: String) {
        self.date = date;
    }

    /// Replace the row descriptors
    pub fn set_rows(&mut self, rows: Vec<Value>) {
        self.rows = rows;
    }

    /// Replace the column descriptors
    pub fn set_columns(&mut self, columns: Vec<Value>) {
        self.columns = columns;
    }

    /// Replace the element type
    pub fn set_element_type(&mut self, element_type: ElementType) {
        self.element_type = element_type;
    }

    /// Replace the logical dimensions
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    /// Replace the matrix payload; the `matrix_type` tag follows the
    /// payload's encoding
    pub fn set_data(&mut self, data: MatrixData) {
        self.data = data;
    }

    /// Replace the comment
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    /// Explicitly verify the cross-field rules that assignment leaves
    /// unchecked
    ///
    /// Verifies that descriptor counts match the shape, that a dense
    /// payload has exactly the shaped number of rows and columns, and that
    /// every sparse index lies inside the shape. Never run implicitly.
    pub fn check_consistency(&self) -> Result<()> {
        let (nrows, ncols) = self.shape.as_pair();

        if self.rows.len() != nrows {
            return Err(BiomError::Inconsistent {
                reason: format!(
                    "{} row descriptors for {} shaped rows",
                    self.rows.len(),
                    nrows
                ),
            });
        }
        if self.columns.len() != ncols {
            return Err(BiomError::Inconsistent {
                reason: format!(
                    "{} column descriptors for {} shaped columns",
                    self.columns.len(),
                    ncols
                ),
            });
        }

        match &self.data {
            MatrixData::Sparse(entries) => {
                for entry in entries {
                    if entry.row >= nrows || entry.col >= ncols {
                        return Err(BiomError::Inconsistent {
                            reason: format!(
                                "sparse index ({}, {}) outside shape ({nrows}, {ncols})",
                                entry.row, entry.col
                            ),
                        });
                    }
                }
            }
            MatrixData::Dense(rows) => {
                if rows.len() != nrows {
                    return Err(BiomError::Inconsistent {
                        reason: format!("{} dense rows for {} shaped rows", rows.len(), nrows),
                    });
                }
                for (index, row) in rows.iter().enumerate() {
                    if row.len() != ncols {
                        return Err(BiomError::Inconsistent {
                            reason: format!(
                                "dense row {index} has {} values for {} shaped columns",
                                row.len(),
                                ncols
                            ),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for BiomTable {
    fn default() -> Self {
        TableBuilder::new().build()
    }
}

impl MatrixAccess for BiomTable {
    fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.shape.rows || col >= self.shape.cols {
            return None;
        }
        self.data.value_at(row, col)
    }

    fn dimensions(&self) -> (usize, usize) {
        self.shape.as_pair()
    }

    fn nnz(&self) -> usize {
        self.data.nnz()
    }
}

/// Builder for [`BiomTable`] with every field optional
///
/// Unset fields take the documented defaults: the BIOM 1.0.0 format
/// identifiers, `OTU table` type, `float` elements, an empty sparse
/// payload with shape `(0, 0)`, no identifier or comment, and the current
/// UTC time as the `date`.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    id: Option<String>,
    format: Option<String>,
    format_url: Option<String>,
    table_type: Option<TableType>,
    generated_by: Option<String>,
    date: Option<String>,
    rows: Option<Vec<Value>>,
    columns: Option<Vec<Value>>,
    element_type: Option<ElementType>,
    shape: Option<Shape>,
    data: Option<MatrixData>,
    comment: Option<String>,
}

impl TableBuilder {
    /// Create a builder with no fields set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table identifier
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the format descriptor
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the format reference URL text
    pub fn format_url(mut self, format_url: impl Into<String>) -> Self {
        self.format_url = Some(format_url.into());
        self
    }

    /// Set the table type
    pub fn table_type(mut self, table_type: TableType) -> Self {
        self.table_type = Some(table_type);
        self
    }

    /// Set the producer identifier
    pub fn generated_by(mut self, generated_by: impl Into<String>) -> Self {
        self.generated_by = Some(generated_by.into());
        self
    }

    /// Set the creation timestamp text
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the row descriptors
    pub fn rows(mut self, rows: Vec<Value>) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Set the column descriptors
    pub fn columns(mut self, columns: Vec<Value>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Set the element type
    pub fn element_type(mut self, element_type: ElementType) -> Self {
        self.element_type = Some(element_type);
        self
    }

    /// Set the logical dimensions
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Set the matrix payload
    pub fn data(mut self, data: MatrixData) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the comment
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Build the table, applying defaults for unset fields
    pub fn build(self) -> BiomTable {
        BiomTable {
            id: self.id,
            format: self.format.unwrap_or_else(|| BiomTable::FORMAT.to_owned()),
            format_url: self
                .format_url
                .unwrap_or_else(|| BiomTable::FORMAT_URL.to_owned()),
            table_type: self.table_type.unwrap_or_default(),
            generated_by: self
                .generated_by
                .unwrap_or_else(|| BiomTable::GENERATED_BY.to_owned()),
            date: self.date.unwrap_or_else(current_timestamp),
            rows: self.rows.unwrap_or_default(),
            columns: self.columns.unwrap_or_default(),
            element_type: self.element_type.unwrap_or_default(),
            shape: self.shape.unwrap_or_default(),
            data: self.data.unwrap_or_default(),
            comment: self.comment,
        }
    }
}

/// Current UTC time as an ISO-8601 string, the `date` default
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
