//! Basic blocks and control-flow edges

use bitflags::bitflags;
use lh_common::BlockId;
use serde::{Deserialize, Serialize};
use crate::{Statement, StatementKind};

bitflags! {
    /// Properties of a control-flow edge
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct EdgeFlags: u16 {
        const FALLTHRU = 1 << 0;
        const ABNORMAL = 1 << 1;
        const ABNORMAL_CALL = 1 << 2;
        const EXCEPTIONAL = 1 << 3;
        const TRUE_VALUE = 1 << 4;
        const FALSE_VALUE = 1 << 5;
        const LOOP_EXIT = 1 << 6;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlFlowEdge {
    pub source: BlockId,
    pub target: BlockId,
    #[serde(default)]
    pub flags: EdgeFlags,
}

/// Basic Block - a sequence of statements with a single entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: BlockId,
    pub statements: Vec<Statement>,
    #[serde(default)]
    pub successors: Vec<ControlFlowEdge>,
}

impl BasicBlock {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            statements: Vec::new(),
            successors: Vec::new(),
        }
    }

    pub fn add_statement(&mut self, stmt: Statement) {
        self.statements.push(stmt);
    }

    pub fn add_edge(&mut self, target: BlockId, flags: EdgeFlags) {
        self.successors.push(ControlFlowEdge { source: self.id, target, flags });
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The statement that decides where control goes next
    pub fn terminator(&self) -> Option<&Statement> {
        self.statements.last()
    }

    /// Targets of the true and false edges of a two-way branch
    pub fn true_false_targets(&self) -> Option<(BlockId, BlockId)> {
        let target_with = |flag: EdgeFlags| {
            self.successors
                .iter()
                .find(|e| e.flags.contains(flag))
                .map(|e| e.target)
        };
        Some((target_with(EdgeFlags::TRUE_VALUE)?, target_with(EdgeFlags::FALSE_VALUE)?))
    }

    /// Whether the terminator already encodes `edge`, so the edge must not
    /// be listed again after the statements
    pub fn edge_is_implied(&self, edge: &ControlFlowEdge) -> bool {
        match self.terminator().map(|s| &s.kind) {
            Some(StatementKind::Conditional { .. }) => {
                edge.flags.intersects(EdgeFlags::TRUE_VALUE | EdgeFlags::FALSE_VALUE)
            }
            Some(StatementKind::Switch { arms, .. }) => {
                arms.iter().any(|arm| arm.target == edge.target)
            }
            Some(StatementKind::Return { .. }) => true,
            _ => false,
        }
    }
}
