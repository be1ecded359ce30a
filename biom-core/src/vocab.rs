//! Controlled vocabularies for BIOM table fields
//!
//! Each vocabulary is a closed enumeration with a single exhaustive mapping
//! to and from its wire spelling. Membership is checked once, where text
//! enters through [`FromStr`]; in-memory values cannot leave the vocabulary.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BiomError;

/// Kind of biological observation recorded in a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableType {
    /// Operational taxonomic unit counts
    #[default]
    #[serde(rename = "OTU table")]
    Otu,
    /// Pathway abundances
    #[serde(rename = "Pathway table")]
    Pathway,
    /// Function abundances
    #[serde(rename = "Function table")]
    Function,
    /// Ortholog abundances
    #[serde(rename = "Ortholog table")]
    Ortholog,
    /// Gene counts
    #[serde(rename = "Gene table")]
    Gene,
    /// Metabolite abundances
    #[serde(rename = "Metabolite table")]
    Metabolite,
    /// Taxon counts
    #[serde(rename = "Taxon table")]
    Taxon,
}

impl TableType {
    /// Every member of the vocabulary
    pub const ALL: [TableType; 7] = [
        TableType::Otu,
        TableType::Pathway,
        TableType::Function,
        TableType::Ortholog,
        TableType::Gene,
        TableType::Metabolite,
        TableType::Taxon,
    ];

    /// Wire spelling of this table type
    pub const fn as_str(&self) -> &'static str {
        match self {
            TableType::Otu => "OTU table",
            TableType::Pathway => "Pathway table",
            TableType::Function => "Function table",
            TableType::Ortholog => "Ortholog table",
            TableType::Gene => "Gene table",
            TableType::Metabolite => "Metabolite table",
            TableType::Taxon => "Taxon table",
        }
    }
}

impl FromStr for TableType {
    type Err = BiomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OTU table" => Ok(TableType::Otu),
            "Pathway table" => Ok(TableType::Pathway),
            "Function table" => Ok(TableType::Function),
            "Ortholog table" => Ok(TableType::Ortholog),
            "Gene table" => Ok(TableType::Gene),
            "Metabolite table" => Ok(TableType::Metabolite),
            "Taxon table" => Ok(TableType::Taxon),
            _ => Err(BiomError::VocabularyViolation {
                field: "type",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for TableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding of the matrix payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixType {
    /// Only non-zero entries are listed, as coordinate triples
    #[default]
    #[serde(rename = "sparse")]
    Sparse,
    /// Every entry is listed, row by row
    #[serde(rename = "dense")]
    Dense,
}

impl MatrixType {
    /// Every member of the vocabulary
    pub const ALL: [MatrixType; 2] = [MatrixType::Sparse, MatrixType::Dense];

    /// Wire spelling of this matrix type
    pub const fn as_str(&self) -> &'static str {
        match self {
            MatrixType::Sparse => "sparse",
            MatrixType::Dense => "dense",
        }
    }
}

impl FromStr for MatrixType {
    type Err = BiomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sparse" => Ok(MatrixType::Sparse),
            "dense" => Ok(MatrixType::Dense),
            _ => Err(BiomError::VocabularyViolation {
                field: "matrix_type",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for MatrixType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intended interpretation of matrix values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// Integer counts
    #[serde(rename = "int")]
    Int,
    /// Floating point abundances
    #[default]
    #[serde(rename = "float")]
    Float,
    /// Textual values
    #[serde(rename = "unicode")]
    Unicode,
}

impl ElementType {
    /// Every member of the vocabulary
    pub const ALL: [ElementType; 3] = [ElementType::Int, ElementType::Float, ElementType::Unicode];

    /// Wire spelling of this element type
    pub const fn as_str(&self) -> &'static str {
        match self {
            ElementType::Int => "int",
            ElementType::Float => "float",
            ElementType::Unicode => "unicode",
        }
    }
}

impl FromStr for ElementType {
    type Err = BiomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(ElementType::Int),
            "float" => Ok(ElementType::Float),
            "unicode" => Ok(ElementType::Unicode),
            _ => Err(BiomError::VocabularyViolation {
                field: "matrix_element_type",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn table_type_round_trips_through_wire_spelling() {
        for t in TableType::ALL {
            assert_eq!(t.as_str().parse::<TableType>(), Ok(t));
        }
    }

    #[test]
    fn matrix_type_round_trips_through_wire_spelling() {
        for t in MatrixType::ALL {
            assert_eq!(t.as_str().parse::<MatrixType>(), Ok(t));
        }
    }

    #[test]
    fn element_type_round_trips_through_wire_spelling() {
        for t in ElementType::ALL {
            assert_eq!(t.as_str().parse::<ElementType>(), Ok(t));
        }
    }

    #[test]
    fn out_of_vocabulary_values_are_rejected() {
        let err = "Invalid table".parse::<TableType>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VocabularyViolation);
        assert_eq!(err.field(), Some("type"));

        let err = "coo".parse::<MatrixType>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VocabularyViolation);
        assert_eq!(err.field(), Some("matrix_type"));

        let err = "double".parse::<ElementType>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VocabularyViolation);
        assert_eq!(err.field(), Some("matrix_element_type"));
    }

    #[test]
    fn vocabulary_is_case_sensitive() {
        assert!("otu table".parse::<TableType>().is_err());
        assert!("Sparse".parse::<MatrixType>().is_err());
    }

    #[test]
    fn defaults_match_the_default_table() {
        assert_eq!(TableType::default(), TableType::Otu);
        assert_eq!(MatrixType::default(), MatrixType::Sparse);
        assert_eq!(ElementType::default(), ElementType::Float);
    }

    #[test]
    fn serde_uses_the_wire_spelling() {
        let json = serde_json::to_string(&TableType::Gene).unwrap();
        assert_eq!(json, "\"Gene table\"");
        let back: TableType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TableType::Gene);
    }
}
