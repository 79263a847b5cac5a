//! Statements of a basic block

use crate::{CallExpr, Expression, Operator};
use lh_common::{BlockId, SourceLocation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    /// `lhs = rhs1`, `lhs = op rhs1` or `lhs = rhs1 op rhs2`. A missing
    /// operator is a plain copy.
    Assign {
        lhs: Expression,
        #[serde(default)]
        op: Option<Operator>,
        rhs1: Expression,
        #[serde(default)]
        rhs2: Option<Expression>,
    },
    /// Two-way branch; its targets are the block's true/false edges
    Conditional {
        lhs: Expression,
        op: Operator,
        rhs: Expression,
    },
    Return {
        #[serde(default)]
        value: Option<Expression>,
    },
    Switch {
        index: Expression,
        arms: Vec<SwitchArm>,
    },
    Call(CallExpr),
    Goto,
    ExceptionDispatch,

    // Present in the host representation but never written
    Label,
    Predict,
    InlineAsm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchArm {
    pub case: CaseValue,
    pub target: BlockId,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CaseValue {
    Default,
    Exact(Expression),
    Range { low: Expression, high: Expression },
}

impl Statement {
    pub fn new(kind: StatementKind) -> Self {
        Self { kind, location: None }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn copy(lhs: Expression, rhs: Expression) -> Self {
        Self::new(StatementKind::Assign { lhs, op: None, rhs1: rhs, rhs2: None })
    }

    pub fn assign_unary(lhs: Expression, op: Operator, rhs: Expression) -> Self {
        Self::new(StatementKind::Assign { lhs, op: Some(op), rhs1: rhs, rhs2: None })
    }

    pub fn assign_binary(lhs: Expression, op: Operator, rhs1: Expression, rhs2: Expression) -> Self {
        Self::new(StatementKind::Assign { lhs, op: Some(op), rhs1, rhs2: Some(rhs2) })
    }

    pub fn branch(lhs: Expression, op: Operator, rhs: Expression) -> Self {
        Self::new(StatementKind::Conditional { lhs, op, rhs })
    }

    pub fn ret(value: Option<Expression>) -> Self {
        Self::new(StatementKind::Return { value })
    }

    pub fn call(call: CallExpr) -> Self {
        Self::new(StatementKind::Call(call))
    }

    pub fn switch(index: Expression, arms: Vec<SwitchArm>) -> Self {
        Self::new(StatementKind::Switch { index, arms })
    }

    /// Labels, prediction hints and inline assembly carry nothing a
    /// consumer needs
    pub fn is_placeholder(&self) -> bool {
        matches!(
            self.kind,
            StatementKind::Label | StatementKind::Predict | StatementKind::InlineAsm
        )
    }
}

impl SwitchArm {
    pub fn new(case: CaseValue, target: BlockId) -> Self {
        Self { case, target, location: None }
    }
}
