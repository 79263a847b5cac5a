//! Host program representation for one translation unit
//! 
//! The host compiler supplies types, declarations, expression trees and
//! per-function control-flow graphs in this form. Aggregate types and
//! declarations live in arenas keyed by their host uid; every other node
//! refers to them by uid, which is how cyclic type graphs are expressed.
//! 
//! ## Architecture
//! 
//! - `types` - Type nodes and aggregate definitions
//! - `ops` - Operator vocabulary shared by expressions and statements
//! - `decls` - Declarations and scope derivation
//! - `expressions` - Expression trees and literals
//! - `statements` - Statements of a basic block
//! - `blocks` - Basic blocks and control-flow edges
//! - `function` - Function bodies
//! - `unit` - The translation unit and its lookup tables
//! - `builder` - Construction utilities

pub use self::types::{
    AggregateDef, AggregateShape, FunctionType, Qualifiers, ScalarKind, ScalarType, TypeKind,
    TypeNode,
};
pub use self::ops::Operator;
pub use self::decls::{DeclContext, DeclKind, DeclNode, Scope};
pub use self::expressions::{CallExpr, Callee, Expression, FloatValue, Literal, RefKind};
pub use self::statements::{CaseValue, Statement, StatementKind, SwitchArm};
pub use self::blocks::{BasicBlock, ControlFlowEdge, EdgeFlags};
pub use self::function::FunctionBody;
pub use self::unit::{TranslationUnit, UnitTables};
pub use self::builder::{FunctionBuilder, UnitBuilder};

mod types;
mod ops;
mod decls;
mod expressions;
mod statements;
mod blocks;
mod function;
mod unit;
mod builder;
