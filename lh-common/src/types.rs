//! Identifier types used throughout the workspace
//! 
//! Identifiers are supplied by the host compiler. They must be stable and
//! unique within one translation unit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a type node (aggregates and enums)
pub type TypeUid = u32;

/// Unique identifier of a declaration
pub type DeclUid = u32;

/// Index of a basic block within its function
pub type BlockId = u32;

/// Source language of a translation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SourceLanguage {
    #[default]
    C,
    #[serde(rename = "C++")]
    Cxx,
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLanguage::C => write!(f, "C"),
            SourceLanguage::Cxx => write!(f, "C++"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_display() {
        assert_eq!(SourceLanguage::C.to_string(), "C");
        assert_eq!(SourceLanguage::Cxx.to_string(), "C++");
        assert_eq!(SourceLanguage::default(), SourceLanguage::C);
    }
}
