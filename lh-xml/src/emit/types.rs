//! Type serialization
//!
//! Scalars, pointers, function types and enums are written inline where
//! they are used. Aggregates are written inline only as references; their
//! single full definition goes to the types section.

use super::{DeclTag, Emitter};
use crate::writer::{Attrs, XmlWriter};
use lh_common::{Result, TypeUid};
use lh_ir::{AggregateShape, DeclNode, FunctionType, Qualifiers, ScalarKind, ScalarType, TypeKind, TypeNode};
use log::warn;

impl Emitter<'_> {
    /// Write `ty` at its use site. `decl` is the declaration the type
    /// belongs to, when there is one; it contributes function attributes.
    pub fn emit_type(&mut self, w: &mut XmlWriter, ty: &TypeNode, decl: Option<&DeclNode>) -> Result<()> {
        let named = || Attrs::new().qualifiers(ty.qualifiers).opt("name", ty.name.as_deref());

        match &ty.kind {
            TypeKind::Aggregate(uid) => self.emit_aggregate_ref(w, *uid, ty.qualifiers)?,
            TypeKind::Pointer(pointee) => {
                w.open("addr-of", named());
                self.emit_type(w, pointee, None)?;
                w.close("addr-of");
            }
            TypeKind::Scalar(scalar) => emit_scalar(w, scalar, named()),
            TypeKind::Enum(uid) => {
                // Enumerators are not resolved; only the reference is written.
                w.empty("enum", named().with("id", uid));
            }
            TypeKind::Function(func) => self.emit_function_type(w, func, named(), decl)?,
            TypeKind::Reference(_) => {
                warn!("ignoring unhandled reference type");
            }
        }
        Ok(())
    }

    /// Reference to an aggregate: id, qualifiers and location only. The
    /// first reference queues the full definition.
    pub fn emit_aggregate_ref(&mut self, w: &mut XmlWriter, uid: TypeUid, quals: Qualifiers) -> Result<()> {
        let tables = self.tables;
        let def = tables.aggregate(uid)?;
        self.memo_type(uid);
        w.empty(
            def.shape.tag(),
            Attrs::new()
                .with("id", uid)
                .qualifiers(quals)
                .location(def.location.as_ref()),
        );
        Ok(())
    }

    /// Full definition of an aggregate, members in declaration order
    pub fn emit_aggregate_definition(&mut self, w: &mut XmlWriter, uid: TypeUid) -> Result<()> {
        let tables = self.tables;
        let def = tables.aggregate(uid)?;
        let tag = def.shape.tag();
        let attrs = Attrs::new()
            .with("id", uid)
            .qualifiers(def.qualifiers)
            .opt("name", def.name.as_deref());

        w.open(tag, attrs);
        match &def.shape {
            AggregateShape::Structure { members } | AggregateShape::Union { members } => {
                for &member in members {
                    let decl = tables.decl(member)?;
                    self.emit_decl(w, decl, DeclTag::Member)?;
                }
            }
            AggregateShape::Array { element, domain } => {
                w.open("type", Attrs::new());
                self.emit_type(w, element, None)?;
                w.close("type");
                if let Some(domain) = domain {
                    w.open("domain", Attrs::new());
                    self.emit_type(w, domain, None)?;
                    w.close("domain");
                }
            }
        }
        w.close(tag);
        Ok(())
    }

    fn emit_function_type(
        &mut self,
        w: &mut XmlWriter,
        func: &FunctionType,
        attrs: Attrs,
        decl: Option<&DeclNode>,
    ) -> Result<()> {
        let noreturn = decl.is_some_and(|d| d.noreturn);
        let mut attributes: Vec<&str> = Vec::new();
        if noreturn {
            attributes.push("noreturn");
        }
        attributes.extend(func.attributes.iter().map(String::as_str));
        let attrs = if attributes.is_empty() {
            attrs
        } else {
            attrs.with("attributes", attributes.join(","))
        };

        w.open("function", attrs);
        w.open("return", Attrs::new());
        self.emit_type(w, &func.returns, None)?;
        w.close("return");
        w.open("arguments", Attrs::new().flag("varargs", func.is_varargs()));
        for param in &func.params {
            self.emit_type(w, param, None)?;
        }
        w.close("arguments");
        w.close("function");
        Ok(())
    }
}

fn emit_scalar(w: &mut XmlWriter, scalar: &ScalarType, attrs: Attrs) {
    match scalar.kind {
        ScalarKind::Integer => {
            let attrs = attrs
                .flag("unsigned", scalar.unsigned)
                .opt("precision", scalar.precision)
                .opt("min", scalar.min)
                .opt("max", scalar.max);
            w.empty("integer", attrs);
        }
        ScalarKind::Float => w.empty("float", attrs.opt("precision", scalar.precision)),
        ScalarKind::Boolean => w.empty("boolean", attrs),
        ScalarKind::Void => w.empty("void", attrs),
    }
}
