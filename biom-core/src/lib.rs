//! BIOM Core - Biological Observation Matrix Table Definitions
//!
//! This crate provides the validated in-memory data model for BIOM tables:
//! controlled vocabularies, the sparse/dense matrix payload, and the table
//! record itself. No I/O - readers and writers live outside this crate and
//! exchange tables through the accessors defined here.

pub mod error;
pub mod matrix;
pub mod table;
pub mod vocab;

pub use error::*;
pub use matrix::*;
pub use table::*;
pub use vocab::*;

/// Shape and value access over a table's matrix, regardless of encoding
pub trait MatrixAccess {
    /// Get the value at the specified position
    ///
    /// Returns `None` when the position lies outside the dimensions or,
    /// for the sparse encoding, when no entry is stored there.
    fn value_at(&self, row: usize, col: usize) -> Option<f64>;

    /// Get logical dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Get number of non-zero values stored
    fn nnz(&self) -> usize;
}

/// Row and column materialization over any [`MatrixAccess`]
pub trait MatrixOps: MatrixAccess {
    /// All values of a row in column order, zeros included
    fn row_values(&self, row_index: usize) -> Vec<f64> {
        let (_, cols) = self.dimensions();
        (0..cols)
            .map(|col| self.value_at(row_index, col).unwrap_or(0.0))
            .collect()
    }

    /// All values of a column in row order, zeros included
    fn col_values(&self, col_index: usize) -> Vec<f64> {
        let (rows, _) = self.dimensions();
        (0..rows)
            .map(|row| self.value_at(row, col_index).unwrap_or(0.0))
            .collect()
    }
}

impl<T: MatrixAccess> MatrixOps for T {}
