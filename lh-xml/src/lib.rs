//! Lighthouse XML serializer
//!
//! Turns a [`lh_ir::TranslationUnit`] into one self-contained XML document:
//! the raw source, every aggregate type the unit's functions reach (each
//! defined exactly once), and one record per function with its locals,
//! basic blocks and external declarations.
//!
//! ## Architecture
//!
//! - `memo` - Identity memo keyed by host uid
//! - `writer` - Escaping and indented element output
//! - `emit` - Type, declaration, expression and statement serializers
//! - `assembler` - Per-unit buffers and final document layout
//! - `sink` - Delivery of the finished document

pub mod memo;
pub mod writer;
pub mod emit;
pub mod assembler;
pub mod sink;

pub use assembler::{serialize_unit, UnitSerializer};
pub use emit::{DeclTag, Emitter};
pub use memo::UidMemo;
pub use sink::{deliver, DocumentSink, FileSink, MemorySink, ProcessSink, StdoutSink, DEFAULT_CONSUMER};
pub use writer::{Attrs, XmlWriter};
