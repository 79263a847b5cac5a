//! Error handling for the lighthouse serializer
//! 
//! Every error is fatal for the translation unit being processed. Shapes
//! that are documented as unsupported are not errors; they are skipped with
//! a warning at the point where they are encountered.

use crate::types::{DeclUid, TypeUid};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LighthouseError>;

/// Main error type that encompasses all phases of serialization
#[derive(Error, Debug)]
pub enum LighthouseError {
    /// The host supplied a node with no encoding rule
    #[error("unsupported {construct}: {message}")]
    UnsupportedShape {
        construct: &'static str,
        message: String,
    },

    #[error("reference to unknown type uid {uid}")]
    DanglingType { uid: TypeUid },

    #[error("reference to unknown declaration uid {uid}")]
    DanglingDecl { uid: DeclUid },

    /// Acquiring a buffer, stream, source file or consumer process failed
    #[error("{action}: {source}")]
    Resource {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("downstream consumer exited non-zero ({status})")]
    ConsumerFailed { status: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LighthouseError {
    /// Create an unsupported-shape fault
    pub fn unsupported(construct: &'static str, message: impl Into<String>) -> Self {
        LighthouseError::UnsupportedShape {
            construct,
            message: message.into(),
        }
    }

    /// Wrap an I/O failure with the action that was being attempted
    pub fn resource(action: impl Into<String>, source: std::io::Error) -> Self {
        LighthouseError::Resource {
            action: action.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LighthouseError::unsupported("statement", "assign with two operands");
        assert_eq!(err.to_string(), "unsupported statement: assign with two operands");

        let err = LighthouseError::DanglingType { uid: 7 };
        assert_eq!(err.to_string(), "reference to unknown type uid 7");

        let err = LighthouseError::ConsumerFailed { status: 3 };
        assert_eq!(err.to_string(), "downstream consumer exited non-zero (3)");
    }

    #[test]
    fn test_resource_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = LighthouseError::resource("reopening input file", io);
        assert_eq!(err.to_string(), "reopening input file: no such file");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: LighthouseError = io.into();
        assert!(matches!(err, LighthouseError::Io(_)));
    }
}
