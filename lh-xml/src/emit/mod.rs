//! Serialization of types, declarations, expressions and statements
//!
//! All emitters share one [`Emitter`], which owns the two identity memos
//! and the two work queues. Emitting never recurses into a second
//! definition: an aggregate reached anywhere is written as a reference and
//! queued, and a file-scope declaration reached inside a function body is
//! queued for that function's externals. [`Emitter::drain`] then expands
//! queued entries until both queues are empty.

mod types;
mod decls;
mod expressions;
mod statements;

pub use decls::DeclTag;

use crate::memo::UidMemo;
use crate::writer::XmlWriter;
use lh_common::{DeclUid, Result, TypeUid};
use lh_ir::UnitTables;
use log::{debug, trace};
use std::collections::VecDeque;

pub struct Emitter<'u> {
    tables: &'u UnitTables,
    /// Aggregates already defined or queued; never reset within a unit
    type_memo: UidMemo,
    /// External declarations of the current function
    decl_memo: UidMemo,
    pending_types: VecDeque<TypeUid>,
    pending_externals: VecDeque<DeclUid>,
    in_function: bool,
}

impl<'u> Emitter<'u> {
    pub fn new(tables: &'u UnitTables) -> Self {
        Self {
            tables,
            type_memo: UidMemo::new(),
            decl_memo: UidMemo::new(),
            pending_types: VecDeque::new(),
            pending_externals: VecDeque::new(),
            in_function: false,
        }
    }

    /// Start a function body: external declarations are tracked afresh
    pub fn begin_function(&mut self) {
        self.decl_memo.reset();
        self.pending_externals.clear();
        self.in_function = true;
    }

    pub fn end_function(&mut self) {
        self.in_function = false;
    }

    /// Queue an aggregate for definition the first time it is seen
    pub fn memo_type(&mut self, uid: TypeUid) {
        if self.type_memo.add(uid) {
            trace!("queued aggregate {uid} for definition");
            self.pending_types.push_back(uid);
        }
    }

    /// Queue a file-scope declaration for the current function's externals
    pub fn memo_decl(&mut self, uid: DeclUid) {
        if !self.in_function {
            return;
        }
        if self.decl_memo.add(uid) {
            trace!("queued external declaration {uid}");
            self.pending_externals.push_back(uid);
        }
    }

    /// Expand everything queued: external declarations into `externals`,
    /// aggregate definitions into `types`. Expanding either may queue more
    /// work; the loop ends when both queues are empty.
    pub fn drain(&mut self, types: &mut XmlWriter, externals: &mut XmlWriter) -> Result<()> {
        let tables = self.tables;
        let (mut defined, mut declared) = (0usize, 0usize);

        loop {
            if let Some(uid) = self.pending_externals.pop_front() {
                let decl = tables.decl(uid)?;
                self.emit_decl(externals, decl, DeclTag::External)?;
                declared += 1;
            } else if let Some(uid) = self.pending_types.pop_front() {
                self.emit_aggregate_definition(types, uid)?;
                defined += 1;
            } else {
                break;
            }
        }

        if defined + declared > 0 {
            debug!("drained {defined} aggregate definitions and {declared} external declarations");
        }
        Ok(())
    }

    pub fn types_defined(&self) -> usize {
        self.type_memo.len()
    }

    /// Release memo storage at the end of the unit
    pub fn release(&mut self) {
        self.type_memo.destroy();
        self.decl_memo.destroy();
    }
}
