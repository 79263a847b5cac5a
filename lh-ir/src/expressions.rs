//! Expression trees

use crate::{Operator, TypeNode};
use lh_common::DeclUid;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Constant {
        #[serde(rename = "type")]
        ty: TypeNode,
        value: Literal,
    },
    /// Use of a variable, parameter or result slot
    Reference { decl: DeclUid, kind: RefKind },
    /// Function designator
    Function { decl: DeclUid },
    Unary {
        op: Operator,
        operand: Box<Expression>,
    },
    Binary {
        op: Operator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    AddressOf(Box<Expression>),
    Indirection(Box<Expression>),
    MemberAccess {
        structure: Box<Expression>,
        member: DeclUid,
    },
    BitfieldAccess {
        structure: Box<Expression>,
        bit_offset: u64,
        bit_size: u64,
        as_type: TypeNode,
    },
    IndexAccess {
        array: Box<Expression>,
        index: Box<Expression>,
    },
    Call(CallExpr),
    /// Elements in order; their position is the element index
    Constructor(Vec<Expression>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefKind {
    Bound,
    Result,
    Parameter,
}

impl RefKind {
    pub fn tag(&self) -> &'static str {
        match self {
            RefKind::Bound => "bound",
            RefKind::Result => "result",
            RefKind::Parameter => "bound-parameter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Integer(i128),
    Float(FloatValue),
    /// Raw bytes of a string constant, including any terminator
    String(Vec<u8>),
}

/// A floating constant. Non-finite values are explicit so that the
/// representation survives JSON transport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FloatValue {
    Finite(f64),
    Infinity { negative: bool },
    NaN,
}

impl From<f64> for FloatValue {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            FloatValue::NaN
        } else if value.is_infinite() {
            FloatValue::Infinity { negative: value.is_sign_negative() }
        } else {
            FloatValue::Finite(value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Callee {
    /// Statically known function
    Decl(DeclUid),
    /// Computed target, e.g. through a function pointer
    Expr(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Callee,
    pub args: Vec<Expression>,
    /// Where the result goes; `None` when it is discarded
    #[serde(default)]
    pub result: Option<Box<Expression>>,
}

impl Expression {
    pub fn int(ty: TypeNode, value: i128) -> Self {
        Expression::Constant { ty, value: Literal::Integer(value) }
    }

    pub fn float(ty: TypeNode, value: f64) -> Self {
        Expression::Constant { ty, value: Literal::Float(value.into()) }
    }

    pub fn string(ty: TypeNode, bytes: &[u8]) -> Self {
        Expression::Constant { ty, value: Literal::String(bytes.to_vec()) }
    }

    pub fn var(decl: DeclUid) -> Self {
        Expression::Reference { decl, kind: RefKind::Bound }
    }

    pub fn param(decl: DeclUid) -> Self {
        Expression::Reference { decl, kind: RefKind::Parameter }
    }

    pub fn result(decl: DeclUid) -> Self {
        Expression::Reference { decl, kind: RefKind::Result }
    }

    pub fn binary(op: Operator, left: Expression, right: Expression) -> Self {
        Expression::Binary { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn unary(op: Operator, operand: Expression) -> Self {
        Expression::Unary { op, operand: Box::new(operand) }
    }

    pub fn address_of(operand: Expression) -> Self {
        Expression::AddressOf(Box::new(operand))
    }

    pub fn deref(operand: Expression) -> Self {
        Expression::Indirection(Box::new(operand))
    }

    pub fn member(structure: Expression, member: DeclUid) -> Self {
        Expression::MemberAccess { structure: Box::new(structure), member }
    }

    pub fn index(array: Expression, index: Expression) -> Self {
        Expression::IndexAccess { array: Box::new(array), index: Box::new(index) }
    }
}

impl CallExpr {
    pub fn direct(decl: DeclUid, args: Vec<Expression>, result: Option<Expression>) -> Self {
        Self {
            callee: Callee::Decl(decl),
            args,
            result: result.map(Box::new),
        }
    }

    pub fn indirect(target: Expression, args: Vec<Expression>, result: Option<Expression>) -> Self {
        Self {
            callee: Callee::Expr(Box::new(target)),
            args,
            result: result.map(Box::new),
        }
    }
}
