//! Matrix shape and payload definitions
//!
//! The payload is a sum type keyed by its own variant, so the `matrix_type`
//! tag reported by a table is always derived from the data it actually
//! holds. A tag that disagrees with the encoding is unrepresentable.

use crate::error::{BiomError, Result};
use crate::vocab::MatrixType;

/// Logical `(row_count, column_count)` dimensions of a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Number of logical rows (observations)
    pub rows: usize,
    /// Number of logical columns (samples)
    pub cols: usize,
}

impl Shape {
    /// Create a shape from known dimensions
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Validate a decoded integer sequence as a shape pair
    ///
    /// The sequence must hold exactly two elements and both must be
    /// non-negative. Components are checked in order, so a sequence that is
    /// both too short and negative reports the arity problem first.
    pub fn from_seq(seq: &[i64]) -> Result<Self> {
        if seq.len() != 2 {
            return Err(BiomError::ArityViolation {
                field: "shape",
                expected: 2,
                actual: seq.len(),
            });
        }
        Ok(Self {
            rows: component(seq[0])?,
            cols: component(seq[1])?,
        })
    }

    /// Dimensions as a plain pair
    pub const fn as_pair(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether both dimensions are zero
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 && self.cols == 0
    }
}

fn component(value: i64) -> Result<usize> {
    if value < 0 {
        return Err(BiomError::DomainViolation {
            field: "shape",
            reason: "negative component",
        });
    }
    Ok(value as usize)
}

/// One stored matrix entry in the sparse encoding, zero-based
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseEntry {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
    /// Stored value
    pub value: f64,
}

impl SparseEntry {
    /// Create an entry from a coordinate triple
    pub const fn new(row: usize, col: usize, value: f64) -> Self {
        Self { row, col, value }
    }
}

/// Matrix payload in either of the two BIOM encodings
///
/// Insertion order of sparse entries and of dense rows is preserved; no
/// sorting or deduplication is performed.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixData {
    /// Only non-zero entries, as coordinate triples
    Sparse(Vec<SparseEntry>),
    /// Every entry, row by row
    Dense(Vec<Vec<f64>>),
}

impl Default for MatrixData {
    fn default() -> Self {
        MatrixData::Sparse(Vec::new())
    }
}

impl MatrixData {
    /// An empty payload carrying the given encoding tag
    pub const fn empty(matrix_type: MatrixType) -> Self {
        match matrix_type {
            MatrixType::Sparse => MatrixData::Sparse(Vec::new()),
            MatrixType::Dense => MatrixData::Dense(Vec::new()),
        }
    }

    /// Encoding tag of this payload
    pub const fn matrix_type(&self) -> MatrixType {
        match self {
            MatrixData::Sparse(_) => MatrixType::Sparse,
            MatrixData::Dense(_) => MatrixType::Dense,
        }
    }

    /// Outer sequence length: entry count for sparse, row count for dense
    pub fn len(&self) -> usize {
        match self {
            MatrixData::Sparse(entries) => entries.len(),
            MatrixData::Dense(rows) => rows.len(),
        }
    }

    /// Whether the payload holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of non-zero values stored
    pub fn nnz(&self) -> usize {
        match self {
            MatrixData::Sparse(entries) => entries.len(),
            MatrixData::Dense(rows) => rows
                .iter()
                .map(|row| row.iter().filter(|v| **v != 0.0).count())
                .sum(),
        }
    }

    /// Stored value at a position
    ///
    /// For the sparse encoding, returns `None` when no triple is stored at
    /// the position; for the dense encoding, returns `None` only when the
    /// position falls outside the stored rows. Indices are not checked
    /// against any table shape here.
    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        match self {
            MatrixData::Sparse(entries) => entries
                .iter()
                .find(|e| e.row == row && e.col == col)
                .map(|e| e.value),
            MatrixData::Dense(rows) => rows.get(row)?.get(col).copied(),
        }
    }
}
