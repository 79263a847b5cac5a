//! Source location tracking
//! 
//! Locations are attached to declarations, statements and switch labels by
//! the host, and written into the document as `file:line:column`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Filename the host uses for compiler-synthesized entities
pub const BUILT_IN: &str = "<built-in>";

/// A location in a source file (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(default)]
    pub filename: Option<String>,
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: Some(filename.to_string()),
            line,
            column,
        }
    }

    /// Create a location for a compiler-synthesized entity
    pub fn built_in() -> Self {
        Self {
            filename: None,
            line: 0,
            column: 0,
        }
    }

    /// Filename as written to the document; missing names become `<built-in>`
    pub fn file(&self) -> &str {
        match self.filename.as_deref() {
            Some(name) if name != BUILT_IN => name,
            _ => BUILT_IN,
        }
    }

    pub fn is_built_in(&self) -> bool {
        self.file() == BUILT_IN
    }

    /// `file:line`, the short form used on function records
    pub fn file_line(&self) -> String {
        format!("{}:{}", self.file(), self.line)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file(), self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location() {
        let loc = SourceLocation::new("test.c", 42, 10);
        assert_eq!(loc.file(), "test.c");
        assert_eq!(loc.line, 42);
        assert_eq!(loc.column, 10);
        assert_eq!(format!("{}", loc), "test.c:42:10");
        assert_eq!(loc.file_line(), "test.c:42");
    }

    #[test]
    fn test_built_in_locations() {
        assert!(SourceLocation::built_in().is_built_in());
        assert_eq!(SourceLocation::built_in().to_string(), "<built-in>:0:0");

        let explicit = SourceLocation::new(BUILT_IN, 0, 0);
        assert!(explicit.is_built_in());
        assert!(!SourceLocation::new("a.c", 1, 1).is_built_in());
    }
}
