//! Declarations
//! 
//! Variables, parameters, result slots, functions and aggregate members.
//! The scope class written to the document is derived from the
//! declaration's context and storage, never supplied directly.

use crate::{Expression, TypeNode};
use lh_common::{DeclUid, SourceLocation, TypeUid};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclKind {
    Variable,
    Parameter,
    Result,
    Function,
    Field,
}

/// Where a declaration was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclContext {
    TranslationUnit,
    Function(DeclUid),
    Aggregate(TypeUid),
}

/// Scope class of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Automatic storage or parameter; carries no tag in the document
    Automatic,
    Static,
    File,
    Global,
}

impl Scope {
    /// Attribute value, or `None` for automatic declarations
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Scope::Automatic => None,
            Scope::Static => Some("static"),
            Scope::File => Some("file"),
            Scope::Global => Some("global"),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag().unwrap_or("automatic"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclNode {
    pub uid: DeclUid,
    #[serde(default)]
    pub name: Option<String>,
    pub kind: DeclKind,
    /// `None` for context-less declarations, which count as file scope
    #[serde(default)]
    pub context: Option<DeclContext>,
    /// Static storage duration
    #[serde(default)]
    pub persistent: bool,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    #[serde(default)]
    pub initializer: Option<Expression>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
    /// Size in bits, when laid out
    #[serde(default)]
    pub size: Option<u64>,
    /// Alignment in bits, when laid out
    #[serde(default)]
    pub alignment: Option<u32>,
    /// Function declared as never returning
    #[serde(default)]
    pub noreturn: bool,
}

impl DeclNode {
    pub fn new(uid: DeclUid, name: Option<&str>, kind: DeclKind, ty: TypeNode) -> Self {
        Self {
            uid,
            name: name.map(str::to_string),
            kind,
            context: None,
            persistent: false,
            ty,
            initializer: None,
            location: None,
            size: None,
            alignment: None,
            noreturn: false,
        }
    }

    pub fn in_context(mut self, context: DeclContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    pub fn with_initializer(mut self, init: Expression) -> Self {
        self.initializer = Some(init);
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_layout(mut self, size: u64, alignment: u32) -> Self {
        self.size = Some(size);
        self.alignment = Some(alignment);
        self
    }

    /// Declared at translation-unit level (or without any context)
    pub fn is_file_scope(&self) -> bool {
        matches!(self.context, None | Some(DeclContext::TranslationUnit))
    }

    pub fn scope(&self) -> Scope {
        match (self.is_file_scope(), self.persistent) {
            (true, true) => Scope::File,
            (true, false) => Scope::Global,
            (false, true) => Scope::Static,
            (false, false) => Scope::Automatic,
        }
    }
}
