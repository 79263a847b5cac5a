//! Type nodes
//! 
//! Scalars, pointers, function types and enum references are inline trees.
//! Structures, unions and arrays are defined once in the unit's aggregate
//! table and referenced by uid, so self- and mutually-referential aggregates
//! never form an owning cycle.

use bitflags::bitflags;
use lh_common::{DeclUid, SourceLocation, TypeUid};
use serde::{Deserialize, Serialize};

bitflags! {
    /// C type qualifiers carried by a type node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Qualifiers: u8 {
        const CONST = 1 << 0;
        const VOLATILE = 1 << 1;
        const RESTRICT = 1 << 2;
    }
}

/// A type as it appears at one use site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeNode {
    #[serde(default)]
    pub qualifiers: Qualifiers,
    /// Typedef or tag name, when the host knows one
    #[serde(default)]
    pub name: Option<String>,
    pub kind: TypeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeKind {
    Scalar(ScalarType),
    Pointer(Box<TypeNode>),
    /// Reference to an entry of the aggregate table
    Aggregate(TypeUid),
    /// Enumerators are not resolved
    Enum(TypeUid),
    Function(FunctionType),
    /// C++ reference type; documented as unsupported and skipped
    Reference(Box<TypeNode>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Integer,
    Float,
    Boolean,
    Void,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarType {
    pub kind: ScalarKind,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub unsigned: bool,
    /// Explicit domain bounds; only present for subrange types
    #[serde(default)]
    pub min: Option<i128>,
    #[serde(default)]
    pub max: Option<i128>,
}

/// Function or method type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionType {
    pub returns: Box<TypeNode>,
    /// Parameter types in declaration order. A prototyped, non-variadic
    /// list ends with a `void` sentinel.
    pub params: Vec<TypeNode>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl FunctionType {
    /// Variadic when the parameter list is non-empty and lacks the trailing
    /// `void` sentinel
    pub fn is_varargs(&self) -> bool {
        self.params.last().is_some_and(|last| !last.is_void())
    }
}

/// Full definition of a structure, union or array type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateDef {
    pub uid: TypeUid,
    #[serde(default)]
    pub qualifiers: Qualifiers,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
    pub shape: AggregateShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AggregateShape {
    /// Members in declaration order, as uids into the declaration table
    Structure { members: Vec<DeclUid> },
    Union { members: Vec<DeclUid> },
    Array {
        element: Box<TypeNode>,
        #[serde(default)]
        domain: Option<Box<TypeNode>>,
    },
}

impl AggregateShape {
    /// Element name used for both definitions and references
    pub fn tag(&self) -> &'static str {
        match self {
            AggregateShape::Structure { .. } => "structure",
            AggregateShape::Union { .. } => "union",
            AggregateShape::Array { .. } => "array",
        }
    }
}

impl TypeNode {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            qualifiers: Qualifiers::empty(),
            name: None,
            kind,
        }
    }

    pub fn void() -> Self {
        Self::scalar(ScalarKind::Void, None, false)
    }

    pub fn boolean() -> Self {
        Self::scalar(ScalarKind::Boolean, None, false)
    }

    pub fn integer(precision: u32, unsigned: bool) -> Self {
        Self::scalar(ScalarKind::Integer, Some(precision), unsigned)
    }

    pub fn float(precision: u32) -> Self {
        Self::scalar(ScalarKind::Float, Some(precision), false)
    }

    fn scalar(kind: ScalarKind, precision: Option<u32>, unsigned: bool) -> Self {
        Self::new(TypeKind::Scalar(ScalarType {
            kind,
            precision,
            unsigned,
            min: None,
            max: None,
        }))
    }

    pub fn pointer_to(pointee: TypeNode) -> Self {
        Self::new(TypeKind::Pointer(Box::new(pointee)))
    }

    pub fn aggregate(uid: TypeUid) -> Self {
        Self::new(TypeKind::Aggregate(uid))
    }

    pub fn enumeration(uid: TypeUid) -> Self {
        Self::new(TypeKind::Enum(uid))
    }

    pub fn function(returns: TypeNode, params: Vec<TypeNode>) -> Self {
        Self::new(TypeKind::Function(FunctionType {
            returns: Box::new(returns),
            params,
            attributes: Vec::new(),
        }))
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn qualified(mut self, qualifiers: Qualifiers) -> Self {
        self.qualifiers |= qualifiers;
        self
    }

    /// Restrict an integer type to an explicit domain
    pub fn with_bounds(mut self, min: i128, max: i128) -> Self {
        if let TypeKind::Scalar(scalar) = &mut self.kind {
            scalar.min = Some(min);
            scalar.max = Some(max);
        }
        self
    }

    pub fn is_void(&self) -> bool {
        matches!(&self.kind, TypeKind::Scalar(s) if s.kind == ScalarKind::Void)
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match &self.kind {
            TypeKind::Function(f) => Some(f),
            _ => None,
        }
    }
}
