//! Declaration serialization

use super::Emitter;
use crate::writer::{Attrs, XmlWriter};
use lh_common::Result;
use lh_ir::{DeclKind, DeclNode};

/// Element name a declaration is written under, by the role it plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclTag {
    Local,
    Member,
    Arg,
    External,
}

impl DeclTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclTag::Local => "local",
            DeclTag::Member => "member",
            DeclTag::Arg => "arg",
            DeclTag::External => "external",
        }
    }
}

impl Emitter<'_> {
    /// Full declaration: binding, type with layout, and the initializer of
    /// a variable that has one
    pub fn emit_decl(&mut self, w: &mut XmlWriter, decl: &DeclNode, tag: DeclTag) -> Result<()> {
        let tag = tag.as_str();
        w.open(tag, Attrs::new().location(decl.location.as_ref()));
        self.emit_binding(w, decl, "binding");

        w.open(
            "type",
            Attrs::new()
                .opt("size", decl.size)
                .opt("alignment", decl.alignment),
        );
        self.emit_type(w, &decl.ty, Some(decl))?;
        w.close("type");

        if let (DeclKind::Variable, Some(init)) = (decl.kind, &decl.initializer) {
            w.open("initial", Attrs::new());
            self.emit_expr(w, init)?;
            w.close("initial");
        }

        w.close(tag);
        Ok(())
    }

    /// `<tag id .../>` naming `decl`. The `binding` form also carries the
    /// name and scope class. Inside a function body, a file-scope
    /// declaration is queued for the externals.
    pub fn emit_binding(&mut self, w: &mut XmlWriter, decl: &DeclNode, tag: &str) {
        if decl.is_file_scope() {
            self.memo_decl(decl.uid);
        }

        let mut attrs = Attrs::new().with("id", decl.uid);
        if tag == "binding" {
            attrs = attrs
                .opt("name", decl.name.as_deref())
                .opt("scope", decl.scope().tag());
        }
        w.empty(tag, attrs);
    }
}
