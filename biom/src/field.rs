//! Stable field names and dynamic field access
//!
//! Writers and readers address table fields by the names fixed here. Each
//! [`assign`] validates the incoming wire value with the same rules the
//! construction boundary uses, then installs it atomically; a failed
//! assignment leaves the table exactly as it was.

use serde_json::{json, Value};

use biom_core::{
    BiomError, BiomTable, ElementType, MatrixData, MatrixType, Result, TableType,
};

use crate::config::{decode_data, decode_shape, encode_data, optional_text, sequence, text};

/// Individually accessible fields of a [`BiomTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `id`
    Id,
    /// `format`
    Format,
    /// `format_url`
    FormatUrl,
    /// `type`
    Type,
    /// `generated_by`
    GeneratedBy,
    /// `date`
    Date,
    /// `rows`
    Rows,
    /// `columns`
    Columns,
    /// `matrix_type`
    MatrixType,
    /// `matrix_element_type`
    MatrixElementType,
    /// `shape`
    Shape,
    /// `data`
    Data,
    /// `comment`
    Comment,
}

impl Field {
    /// Every field, in the order the fields are documented
    pub const ALL: [Field; 13] = [
        Field::Id,
        Field::Format,
        Field::FormatUrl,
        Field::Type,
        Field::GeneratedBy,
        Field::Date,
        Field::Rows,
        Field::Columns,
        Field::MatrixType,
        Field::MatrixElementType,
        Field::Shape,
        Field::Data,
        Field::Comment,
    ];

    /// Stable wire name of this field
    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Format => "format",
            Field::FormatUrl => "format_url",
            Field::Type => "type",
            Field::GeneratedBy => "generated_by",
            Field::Date => "date",
            Field::Rows => "rows",
            Field::Columns => "columns",
            Field::MatrixType => "matrix_type",
            Field::MatrixElementType => "matrix_element_type",
            Field::Shape => "shape",
            Field::Data => "data",
            Field::Comment => "comment",
        }
    }

    /// Look a field up by its stable wire name
    pub fn parse(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a wire value against one field's rules and install it
///
/// On any error the table is untouched. Assigning `matrix_type` re-tags an
/// empty payload and is a no-op when the payload already carries that tag;
/// a non-empty payload cannot be re-tagged, since the stored encoding
/// would then disagree with the tag.
pub fn assign(table: &mut BiomTable, field: Field, value: Value) -> Result<()> {
    match field {
        Field::Id => table.set_id(optional_text("id", Some(value))?),
        Field::Format => table.set_format(text("format", value)?),
        Field::FormatUrl => table.set_format_url(text("format_url", value)?),
        Field::Type => table.set_table_type(text("type", value)?.parse::<TableType>()?),
        Field::GeneratedBy => table.set_generated_by(text("generated_by", value)?),
        Field::Date => table.set_date(text("date", value)?),
        Field::Rows => table.set_rows(sequence("rows", value)?),
        Field::Columns => table.set_columns(sequence("columns", value)?),
        Field::MatrixType => {
            let matrix_type = text("matrix_type", value)?.parse::<MatrixType>()?;
            if table.matrix_type() != matrix_type {
                if !table.data().is_empty() {
                    return Err(BiomError::Inconsistent {
                        reason: format!(
                            "cannot describe a non-empty {} payload as {matrix_type}",
                            table.matrix_type()
                        ),
                    });
                }
                table.set_data(MatrixData::empty(matrix_type));
            }
        }
        Field::MatrixElementType => {
            table.set_element_type(text("matrix_element_type", value)?.parse::<ElementType>()?)
        }
        Field::Shape => table.set_shape(decode_shape(value)?),
        Field::Data => {
            let data = decode_data(table.matrix_type(), Some(value))?;
            table.set_data(data);
        }
        Field::Comment => table.set_comment(optional_text("comment", Some(value))?),
    }
    Ok(())
}

/// Read one field back as a wire value
///
/// Absent `id` and `comment` read as null. This is the accessor surface a
/// writer walks when encoding a table.
pub fn read(table: &BiomTable, field: Field) -> Value {
    match field {
        Field::Id => table.id().map(Value::from).unwrap_or(Value::Null),
        Field::Format => Value::from(table.format()),
        Field::FormatUrl => Value::from(table.format_url()),
        Field::Type => Value::from(table.table_type().as_str()),
        Field::GeneratedBy => Value::from(table.generated_by()),
        Field::Date => Value::from(table.date()),
        Field::Rows => Value::Array(table.rows().to_vec()),
        Field::Columns => Value::Array(table.columns().to_vec()),
        Field::MatrixType => Value::from(table.matrix_type().as_str()),
        Field::MatrixElementType => Value::from(table.element_type().as_str()),
        Field::Shape => json!([table.shape().rows, table.shape().cols]),
        Field::Data => encode_data(table.data()),
        Field::Comment => table.comment().map(Value::from).unwrap_or(Value::Null),
    }
}
