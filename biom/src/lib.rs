//! BIOM - Validated Biological Observation Matrix Tables
//!
//! This library builds and queries BIOM tables, the self-describing
//! sparse-or-dense observation matrices used for OTU, taxon, and gene
//! count data.
//!
//! ## Architecture
//!
//! The workspace follows a clean model/boundary separation:
//!
//! - **biom-core**: Pure data model, controlled vocabularies, and
//!   validation (no I/O)
//! - **biom**: Loosely typed construction boundary and field-level access
//!   for readers and writers
//!
//! ## Quick Start
//!
//! ```rust
//! use biom::{MatrixAccess, TableConfig};
//! use serde_json::json;
//!
//! let config: TableConfig = serde_json::from_value(json!({
//!     "id": "minimal",
//!     "type": "OTU table",
//!     "matrix_type": "sparse",
//!     "shape": [2, 3],
//!     "data": [[0, 1, 5.0], [1, 2, 3.0]],
//! }))
//! .unwrap();
//!
//! let table = config.build().unwrap();
//! assert_eq!(table.dimensions(), (2, 3));
//! assert_eq!(table.value_at(0, 1), Some(5.0));
//! ```
//!
//! ## Guarantees
//!
//! - **Closed vocabularies**: `type`, `matrix_type`, and
//!   `matrix_element_type` cannot hold out-of-vocabulary values
//! - **Honest tagging**: `matrix_type` always describes the encoding the
//!   payload actually uses
//! - **Strong exception safety**: a rejected construction or assignment
//!   leaves nothing half-written
//! - **Stable field names**: writers branch on [`Field`] and
//!   [`Field::as_str`] spellings that never change

// Re-export the core data model
pub use biom_core::{
    // Table record and construction
    BiomTable, TableBuilder,
    // Vocabularies
    ElementType, MatrixType, TableType,
    // Matrix payload
    MatrixData, Shape, SparseEntry,
    // Error handling
    BiomError, ErrorKind, Result,
    // Access traits
    MatrixAccess, MatrixOps,
};

// Boundary modules
pub mod config;
pub mod field;

// Public exports
pub use config::TableConfig;
pub use field::{assign, read, Field};
