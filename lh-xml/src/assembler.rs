//! Document assembly
//!
//! Function records and aggregate definitions accumulate in two buffers
//! while the unit is visited. Each function's externals go to a scratch
//! buffer that is spliced into the record when the function closes. The
//! document is put together only once the unit is finished.

use crate::emit::{DeclTag, Emitter};
use crate::writer::{escape_source, Attrs, XmlWriter};
use lh_common::{LighthouseError, Result};
use lh_ir::{FunctionBody, TranslationUnit};
use log::{debug, info};

pub const PROLOGUE: &str = "<?xml version='1.0' encoding='UTF-8'?>";
pub const ROOT: &str = "lh-translation-unit";

/// Serializer for one translation unit
pub struct UnitSerializer<'u> {
    unit: &'u TranslationUnit,
    client_version: String,
    emitter: Emitter<'u>,
    types: XmlWriter,
    functions: XmlWriter,
    function_count: usize,
}

impl<'u> UnitSerializer<'u> {
    pub fn new(unit: &'u TranslationUnit, client_version: &str) -> Self {
        Self {
            unit,
            client_version: client_version.to_string(),
            emitter: Emitter::new(&unit.tables),
            types: XmlWriter::with_depth(2),
            functions: XmlWriter::with_depth(2),
            function_count: 0,
        }
    }

    /// Append the record of one function, and the definitions of any
    /// aggregates it reaches for the first time
    pub fn serialize_function(&mut self, function: &FunctionBody) -> Result<()> {
        let unit = self.unit;
        let tables = &unit.tables;
        let decl = tables.decl(function.decl)?;
        let name = decl.name.as_deref().ok_or_else(|| {
            LighthouseError::unsupported("function", format!("declaration {} has no name", decl.uid))
        })?;
        let signature = decl.ty.as_function().ok_or_else(|| {
            LighthouseError::unsupported("function", format!("{name} does not have a function type"))
        })?;
        debug!("serializing function {name} ({} blocks)", function.blocks.len());

        self.emitter.begin_function();
        let w = &mut self.functions;

        w.open(
            "function",
            Attrs::new()
                .with("name", name)
                .opt("location", decl.location.as_ref().map(|l| l.file_line()))
                .with("body-begin", function.body_begin)
                .with("body-end", function.body_end),
        );

        w.open("returns", Attrs::new());
        self.emitter.emit_type(w, &signature.returns, None)?;
        w.close("returns");

        w.open("args", Attrs::new().flag("varargs", function.stdarg));
        for &param in &function.params {
            self.emitter.emit_decl(w, tables.decl(param)?, DeclTag::Arg)?;
        }
        w.close("args");

        w.open("body", Attrs::new().with("entrypoint", function.entry));
        w.open("locals", Attrs::new());
        for &local in &function.locals {
            self.emitter.emit_decl(w, tables.decl(local)?, DeclTag::Local)?;
        }
        w.close("locals");
        for block in &function.blocks {
            self.emitter.emit_block(w, block)?;
        }
        w.close("body");

        let mut externals = XmlWriter::with_depth(w.depth() + 1);
        self.emitter.drain(&mut self.types, &mut externals)?;
        w.open("externals", Attrs::new());
        w.append(&externals);
        w.close("externals");

        w.close("function");
        self.emitter.end_function();
        self.function_count += 1;
        Ok(())
    }

    /// Assemble the finished document around `raw_source`, the bytes of
    /// the main source file as read
    pub fn finish(mut self, raw_source: &[u8]) -> Result<Vec<u8>> {
        let mut leftover = XmlWriter::new();
        self.emitter.drain(&mut self.types, &mut leftover)?;
        info!(
            "{}: {} functions, {} aggregate types",
            self.unit.filename,
            self.function_count,
            self.emitter.types_defined()
        );
        self.emitter.release();

        let mut doc = XmlWriter::new();
        doc.raw_line(PROLOGUE);
        doc.raw_line("");
        doc.open(
            ROOT,
            Attrs::new()
                .with("filename", &self.unit.filename)
                .with("language", self.unit.language)
                .with("client-version", &self.client_version),
        );

        let mut source = String::with_capacity(raw_source.len());
        escape_source(&mut source, raw_source);
        doc.text_element("raw-source", &source);

        doc.open("referenced-types", Attrs::new());
        doc.append(&self.types);
        doc.close("referenced-types");

        doc.open("function-bodies", Attrs::new());
        doc.append(&self.functions);
        doc.close("function-bodies");

        doc.close(ROOT);
        Ok(doc.into_string().into_bytes())
    }
}

/// Serialize every function of `unit`, in host order, into one document
pub fn serialize_unit(unit: &TranslationUnit, raw_source: &[u8], client_version: &str) -> Result<Vec<u8>> {
    let mut serializer = UnitSerializer::new(unit, client_version);
    for function in &unit.functions {
        serializer.serialize_function(function)?;
    }
    serializer.finish(raw_source)
}
