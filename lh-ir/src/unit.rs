//! Translation unit and its lookup tables

use crate::{AggregateDef, DeclNode, FunctionBody};
use lh_common::{DeclUid, LighthouseError, Result, SourceLanguage, TypeUid};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Arenas of aggregate definitions and declarations, keyed by host uid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitTables {
    #[serde(default)]
    pub aggregates: FxHashMap<TypeUid, AggregateDef>,
    #[serde(default)]
    pub decls: FxHashMap<DeclUid, DeclNode>,
}

impl UnitTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aggregate(&self, uid: TypeUid) -> Result<&AggregateDef> {
        self.aggregates
            .get(&uid)
            .ok_or(LighthouseError::DanglingType { uid })
    }

    pub fn decl(&self, uid: DeclUid) -> Result<&DeclNode> {
        self.decls
            .get(&uid)
            .ok_or(LighthouseError::DanglingDecl { uid })
    }

    pub fn add_aggregate(&mut self, def: AggregateDef) {
        self.aggregates.insert(def.uid, def);
    }

    pub fn add_decl(&mut self, decl: DeclNode) {
        self.decls.insert(decl.uid, decl);
    }
}

/// One translation unit: lookup tables plus function bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// Main input filename as the host saw it
    pub filename: String,
    #[serde(default)]
    pub language: SourceLanguage,
    #[serde(default)]
    pub tables: UnitTables,
    /// Functions in the order the host visited them
    #[serde(default)]
    pub functions: Vec<FunctionBody>,
}

impl TranslationUnit {
    pub fn new(filename: &str, language: SourceLanguage) -> Self {
        Self {
            filename: filename.to_string(),
            language,
            tables: UnitTables::new(),
            functions: Vec::new(),
        }
    }

    pub fn add_function(&mut self, function: FunctionBody) {
        self.functions.push(function);
    }
}
