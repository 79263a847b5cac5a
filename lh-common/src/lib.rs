//! Lighthouse - Common Types and Utilities
//! 
//! This crate contains the identifier types, source locations and the
//! error type shared by the program representation and the serializer.

pub mod error;
pub mod types;
pub mod source_loc;

pub use error::{LighthouseError, Result};
pub use types::*;
pub use source_loc::SourceLocation;
