//! Expression serialization

use super::Emitter;
use crate::writer::{escape_bytes, Attrs, XmlWriter};
use lh_common::{LighthouseError, Result};
use lh_ir::{CallExpr, Callee, Expression, FloatValue, Literal, Operator, TypeNode};

impl Emitter<'_> {
    pub fn emit_expr(&mut self, w: &mut XmlWriter, expr: &Expression) -> Result<()> {
        let tables = self.tables;

        match expr {
            Expression::Constant { ty, value } => self.emit_constant(w, ty, value)?,
            Expression::Reference { decl, kind } => {
                let decl = tables.decl(*decl)?;
                self.emit_binding(w, decl, kind.tag());
            }
            Expression::Function { decl } => {
                let decl = tables.decl(*decl)?;
                w.open("function", Attrs::new());
                self.emit_binding(w, decl, "bound");
                w.close("function");
            }
            Expression::Unary { op: Operator::AddressOf, operand } | Expression::AddressOf(operand) => {
                w.open("addr-of", Attrs::new());
                self.emit_expr(w, operand)?;
                w.close("addr-of");
            }
            Expression::Unary { op, operand } => {
                w.open("operation", Attrs::new());
                emit_operator(w, *op);
                self.emit_expr(w, operand)?;
                w.close("operation");
            }
            Expression::Binary { op, left, right } => {
                w.open("operation", Attrs::new());
                self.emit_expr(w, left)?;
                emit_operator(w, *op);
                self.emit_expr(w, right)?;
                w.close("operation");
            }
            Expression::Indirection(operand) => {
                w.open("indirection", Attrs::new());
                self.emit_expr(w, operand)?;
                w.close("indirection");
            }
            Expression::MemberAccess { structure, member } => {
                let member = tables.decl(*member)?;
                w.open("member-ref", Attrs::new());
                self.emit_wrapped(w, "structure", structure)?;
                w.open("member", Attrs::new());
                self.emit_binding(w, member, "bound");
                w.close("member");
                w.close("member-ref");
            }
            Expression::BitfieldAccess { structure, bit_offset, bit_size, as_type } => {
                w.open("bitfield-ref", Attrs::new());
                self.emit_wrapped(w, "structure", structure)?;
                w.empty("bits", Attrs::new().with("start", bit_offset).with("size", bit_size));
                w.open("as-type", Attrs::new());
                self.emit_type(w, as_type, None)?;
                w.close("as-type");
                w.close("bitfield-ref");
            }
            Expression::IndexAccess { array, index } => {
                w.open("item-ref", Attrs::new());
                self.emit_wrapped(w, "array", array)?;
                self.emit_wrapped(w, "index", index)?;
                w.close("item-ref");
            }
            Expression::Call(call) => {
                w.open("call", Attrs::new());
                self.emit_call_body(w, call)?;
                w.close("call");
            }
            Expression::Constructor(elements) => {
                w.open("constructor", Attrs::new());
                for element in elements {
                    self.emit_expr(w, element)?;
                }
                w.close("constructor");
            }
        }
        Ok(())
    }

    /// `<tag>expr</tag>`
    pub(super) fn emit_wrapped(&mut self, w: &mut XmlWriter, tag: &str, expr: &Expression) -> Result<()> {
        w.open(tag, Attrs::new());
        self.emit_expr(w, expr)?;
        w.close(tag);
        Ok(())
    }

    fn emit_constant(&mut self, w: &mut XmlWriter, ty: &TypeNode, value: &Literal) -> Result<()> {
        w.open("constant", Attrs::new());
        self.emit_type(w, ty, None)?;
        match value {
            Literal::Integer(v) => w.empty("integer-literal", Attrs::new().with("value", v)),
            Literal::Float(FloatValue::Finite(v)) => {
                w.empty("float-literal", Attrs::new().with("value", format!("{v:?}")))
            }
            Literal::Float(FloatValue::Infinity { negative }) => {
                let special = if *negative { "-Infinity" } else { "+Infinity" };
                w.empty("float-literal", Attrs::new().with("special", special))
            }
            Literal::Float(FloatValue::NaN) => {
                w.empty("float-literal", Attrs::new().with("special", "NaN"))
            }
            Literal::String(bytes) => {
                let mut text = String::with_capacity(bytes.len());
                escape_bytes(&mut text, bytes);
                w.text_element("string-literal", &text);
            }
        }
        w.close("constant");
        Ok(())
    }

    /// Callee, result destination and arguments of a call. Shared by call
    /// expressions and call statements.
    pub(super) fn emit_call_body(&mut self, w: &mut XmlWriter, call: &CallExpr) -> Result<()> {
        match &call.callee {
            Callee::Decl(uid) => {
                let tables = self.tables;
                let decl = tables.decl(*uid)?;
                let name = decl.name.as_deref().ok_or_else(|| {
                    LighthouseError::unsupported("call", format!("callee {uid} has no name"))
                })?;
                if decl.is_file_scope() {
                    self.memo_decl(decl.uid);
                }
                w.empty("function", Attrs::new().with("name", name).with("id", uid));
            }
            Callee::Expr(target) => self.emit_expr(w, target)?,
        }

        w.open("lhs", Attrs::new());
        match &call.result {
            Some(result) => self.emit_expr(w, result)?,
            None => w.empty("void", Attrs::new()),
        }
        w.close("lhs");

        w.open("args", Attrs::new());
        for arg in &call.args {
            self.emit_expr(w, arg)?;
        }
        w.close("args");
        Ok(())
    }
}

/// Empty element naming an operator
pub(super) fn emit_operator(w: &mut XmlWriter, op: Operator) {
    w.empty(op.tag(), Attrs::new());
}
