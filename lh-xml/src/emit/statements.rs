//! Statements, basic blocks and their outgoing edges

use super::expressions::emit_operator;
use super::Emitter;
use crate::writer::{Attrs, XmlWriter};
use lh_common::{LighthouseError, Result};
use lh_ir::{
    BasicBlock, CaseValue, ControlFlowEdge, EdgeFlags, Expression, Operator, Statement,
    StatementKind, SwitchArm,
};
use log::trace;

impl Emitter<'_> {
    /// `<block id>`: its statements, then every outgoing edge the
    /// terminating statement does not already name
    pub fn emit_block(&mut self, w: &mut XmlWriter, block: &BasicBlock) -> Result<()> {
        w.open("block", Attrs::new().with("id", block.id));

        for stmt in &block.statements {
            self.emit_statement(w, block, stmt)?;
        }

        for edge in &block.successors {
            if block.edge_is_implied(edge) {
                trace!("block {}: edge to {} implied by terminator", block.id, edge.target);
                continue;
            }
            emit_edge(w, edge);
        }

        w.close("block");
        Ok(())
    }

    /// One statement of `block`. Placeholders write nothing.
    pub fn emit_statement(&mut self, w: &mut XmlWriter, block: &BasicBlock, stmt: &Statement) -> Result<()> {
        if stmt.is_placeholder() {
            trace!("block {}: skipping placeholder statement", block.id);
            return Ok(());
        }
        let tag = match &stmt.kind {
            StatementKind::Assign { .. } => "assign",
            StatementKind::Conditional { .. } => "if",
            StatementKind::Return { .. } => "return",
            StatementKind::Switch { .. } => "switch",
            StatementKind::Call(_) => "call",
            StatementKind::Goto => "goto",
            StatementKind::ExceptionDispatch => "exception-dispatch",
            _ => return Ok(()),
        };

        w.open(tag, Attrs::new().location(stmt.location.as_ref()));
        match &stmt.kind {
            StatementKind::Assign { lhs, op, rhs1, rhs2 } => {
                self.emit_wrapped(w, "lhs", lhs)?;
                w.open("rhs", Attrs::new());
                self.emit_rhs(w, *op, rhs1, rhs2.as_ref())?;
                w.close("rhs");
            }
            StatementKind::Conditional { lhs, op, rhs } => {
                let (then_id, else_id) = block.true_false_targets().ok_or_else(|| {
                    LighthouseError::unsupported(
                        "statement",
                        format!("conditional in block {} lacks true/false edges", block.id),
                    )
                })?;
                self.emit_expr(w, lhs)?;
                emit_operator(w, *op);
                self.emit_expr(w, rhs)?;
                w.empty("then", Attrs::new().with("id", then_id));
                w.empty("else", Attrs::new().with("id", else_id));
            }
            StatementKind::Return { value } => {
                if let Some(value) = value {
                    self.emit_expr(w, value)?;
                }
            }
            StatementKind::Switch { index, arms } => {
                self.emit_wrapped(w, "index", index)?;
                for arm in arms {
                    self.emit_switch_arm(w, arm)?;
                }
            }
            StatementKind::Call(call) => self.emit_call_body(w, call)?,
            _ => {}
        }
        w.close(tag);
        Ok(())
    }

    fn emit_rhs(
        &mut self,
        w: &mut XmlWriter,
        op: Option<Operator>,
        rhs1: &Expression,
        rhs2: Option<&Expression>,
    ) -> Result<()> {
        match (op, rhs2) {
            (None, None) => self.emit_expr(w, rhs1),
            (Some(op), None) if op.is_conversion() => self.emit_expr(w, rhs1),
            (Some(op), Some(_)) if op.is_conversion() => Err(LighthouseError::unsupported(
                "statement",
                format!("{op} assignment with two operands"),
            )),
            (None, Some(_)) => Err(LighthouseError::unsupported(
                "statement",
                "copy assignment with two operands",
            )),
            (Some(op), Some(rhs2)) => {
                self.emit_expr(w, rhs1)?;
                emit_operator(w, op);
                self.emit_expr(w, rhs2)
            }
            (Some(Operator::AddressOf), None) => match rhs1 {
                Expression::AddressOf(_) => self.emit_expr(w, rhs1),
                _ => self.emit_wrapped(w, "addr-of", rhs1),
            },
            (Some(op), None) => {
                emit_operator(w, op);
                self.emit_expr(w, rhs1)
            }
        }
    }

    fn emit_switch_arm(&mut self, w: &mut XmlWriter, arm: &SwitchArm) -> Result<()> {
        let attrs = Attrs::new()
            .with("id", arm.target)
            .location(arm.location.as_ref());

        match &arm.case {
            CaseValue::Default => w.empty("default", attrs),
            CaseValue::Exact(value) => {
                w.open("case", attrs);
                self.emit_wrapped(w, "exact", value)?;
                w.close("case");
            }
            CaseValue::Range { low, high } => {
                w.open("case", attrs);
                self.emit_wrapped(w, "low-bound", low)?;
                self.emit_wrapped(w, "high-bound", high)?;
                w.close("case");
            }
        }
        Ok(())
    }
}

fn emit_edge(w: &mut XmlWriter, edge: &ControlFlowEdge) {
    let flags = edge.flags;
    w.empty(
        "next",
        Attrs::new()
            .with("id", edge.target)
            .flag("abnormal", flags.contains(EdgeFlags::ABNORMAL))
            .flag("abnormal-call", flags.contains(EdgeFlags::ABNORMAL_CALL))
            .flag("loop-exit", flags.contains(EdgeFlags::LOOP_EXIT))
            .flag("exceptional", flags.contains(EdgeFlags::EXCEPTIONAL)),
    );
}
