//! Operator vocabulary
//! 
//! Operators appear as tags in three places: inside nested expression
//! trees, as the computation of an assignment, and as the comparison of a
//! conditional branch.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    // Arithmetic
    Plus, Minus, Multiply, PointerOffset,
    DivTrunc, DivCeil, DivFloor, DivRound, DivExact, DivReal,
    ModTrunc, ModCeil, ModFloor, ModRound,

    // Conversions and sign
    Float, FixTrunc, Negate, Absolute,
    NopConvert, Convert,

    // Shifts and bitwise
    ShiftLeft, ShiftRight, RotateLeft, RotateRight,
    BitOr, BitXor, BitAnd, BitNot,

    Min, Max, Unordered, Ordered,

    // Logical
    AndIf, OrIf, And, Or, Xor, Not,

    // Comparison
    Lt, Le, Gt, Ge, Eq, Ne,

    AddressOf,
    Constructed,
}

impl Operator {
    /// Element name of the operator tag
    pub fn tag(&self) -> &'static str {
        match self {
            Operator::Plus => "plus",
            Operator::Minus => "minus",
            Operator::Multiply => "multiply",
            Operator::PointerOffset => "pointer-offset",
            Operator::DivTrunc => "division-truncate",
            Operator::DivCeil => "division-ceil",
            Operator::DivFloor => "division-floor",
            Operator::DivRound => "division-round",
            Operator::DivExact => "division-exact",
            Operator::DivReal => "division-real",
            Operator::ModTrunc => "modulo-truncate",
            Operator::ModCeil => "modulo-ceil",
            Operator::ModFloor => "modulo-floor",
            Operator::ModRound => "modulo-round",
            Operator::Float => "float",
            Operator::FixTrunc => "fixed-point-truncate",
            Operator::Negate => "negate",
            Operator::Absolute => "absolute",
            Operator::NopConvert => "nop-convert",
            Operator::Convert => "convert",
            Operator::ShiftLeft => "shift-left",
            Operator::ShiftRight => "shift-right",
            Operator::RotateLeft => "rotate-left",
            Operator::RotateRight => "rotate-right",
            Operator::BitOr => "bitwise-or",
            Operator::BitXor => "bitwise-xor",
            Operator::BitAnd => "bitwise-and",
            Operator::BitNot => "bitwise-not",
            Operator::Min => "min",
            Operator::Max => "max",
            Operator::Unordered => "unordered",
            Operator::Ordered => "ordered",
            Operator::AndIf => "logical-short-and",
            Operator::OrIf => "logical-short-or",
            Operator::And => "logical-and",
            Operator::Or => "logical-or",
            Operator::Xor => "logical-xor",
            Operator::Not => "logical-not",
            Operator::Lt => "less-than",
            Operator::Le => "less-than-or-equal",
            Operator::Gt => "greater-than",
            Operator::Ge => "greater-than-or-equal",
            Operator::Eq => "equal",
            Operator::Ne => "not-equal",
            Operator::AddressOf => "addr-of",
            Operator::Constructed => "constructed",
        }
    }

    /// Conversions assign their single operand straight through
    pub fn is_conversion(&self) -> bool {
        matches!(self, Operator::NopConvert | Operator::Convert)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
