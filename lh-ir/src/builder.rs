//! Unit Builder
//! 
//! Provides utilities for constructing a translation unit programmatically,
//! handing out fresh uids the way a host compiler would.

use lh_common::{BlockId, DeclUid, LighthouseError, Result, SourceLanguage, SourceLocation, TypeUid};
use crate::{
    AggregateDef, AggregateShape, BasicBlock, DeclContext, DeclKind, DeclNode, EdgeFlags,
    FunctionBody, Statement, TranslationUnit, TypeNode,
};

/// Builder for constructing a translation unit
pub struct UnitBuilder {
    unit: TranslationUnit,
    next_type_uid: TypeUid,
    next_decl_uid: DeclUid,
}

impl UnitBuilder {
    pub fn new(filename: &str, language: SourceLanguage) -> Self {
        Self {
            unit: TranslationUnit::new(filename, language),
            next_type_uid: 1,
            next_decl_uid: 1,
        }
    }

    /// Reserve a type uid before the type is defined, so members can refer
    /// back to it
    pub fn new_type_uid(&mut self) -> TypeUid {
        let uid = self.next_type_uid;
        self.next_type_uid += 1;
        uid
    }

    pub fn new_decl_uid(&mut self) -> DeclUid {
        let uid = self.next_decl_uid;
        self.next_decl_uid += 1;
        uid
    }

    pub fn add_decl(&mut self, decl: DeclNode) -> DeclUid {
        let uid = decl.uid;
        if uid >= self.next_decl_uid {
            self.next_decl_uid = uid + 1;
        }
        self.unit.tables.add_decl(decl);
        uid
    }

    /// File-scope variable; `persistent` for static storage
    pub fn global(&mut self, name: &str, ty: TypeNode, persistent: bool) -> DeclUid {
        let uid = self.new_decl_uid();
        let mut decl = DeclNode::new(uid, Some(name), DeclKind::Variable, ty)
            .in_context(DeclContext::TranslationUnit);
        decl.persistent = persistent;
        self.add_decl(decl)
    }

    /// File-scope function declaration
    pub fn function_decl(&mut self, name: &str, ty: TypeNode) -> DeclUid {
        let uid = self.new_decl_uid();
        self.add_decl(
            DeclNode::new(uid, Some(name), DeclKind::Function, ty)
                .in_context(DeclContext::TranslationUnit),
        )
    }

    pub fn decl_mut(&mut self, uid: DeclUid) -> Option<&mut DeclNode> {
        self.unit.tables.decls.get_mut(&uid)
    }

    /// Define a structure under a previously reserved uid
    pub fn define_structure(&mut self, uid: TypeUid, name: Option<&str>, fields: Vec<(&str, TypeNode)>) -> TypeUid {
        let members = self.fields(uid, fields);
        self.define(uid, name, AggregateShape::Structure { members })
    }

    pub fn define_union(&mut self, uid: TypeUid, name: Option<&str>, fields: Vec<(&str, TypeNode)>) -> TypeUid {
        let members = self.fields(uid, fields);
        self.define(uid, name, AggregateShape::Union { members })
    }

    pub fn structure(&mut self, name: Option<&str>, fields: Vec<(&str, TypeNode)>) -> TypeUid {
        let uid = self.new_type_uid();
        self.define_structure(uid, name, fields)
    }

    /// Array of `len` elements, with the domain `0..=len-1`
    pub fn array(&mut self, element: TypeNode, len: Option<u64>) -> TypeUid {
        let uid = self.new_type_uid();
        let domain = len.map(|n| Box::new(TypeNode::integer(64, false).with_bounds(0, i128::from(n) - 1)));
        self.define(uid, None, AggregateShape::Array { element: Box::new(element), domain })
    }

    fn define(&mut self, uid: TypeUid, name: Option<&str>, shape: AggregateShape) -> TypeUid {
        if uid >= self.next_type_uid {
            self.next_type_uid = uid + 1;
        }
        self.unit.tables.add_aggregate(AggregateDef {
            uid,
            qualifiers: Default::default(),
            name: name.map(str::to_string),
            location: None,
            shape,
        });
        uid
    }

    fn fields(&mut self, owner: TypeUid, fields: Vec<(&str, TypeNode)>) -> Vec<DeclUid> {
        fields
            .into_iter()
            .map(|(name, ty)| {
                let uid = self.new_decl_uid();
                self.add_decl(
                    DeclNode::new(uid, Some(name), DeclKind::Field, ty)
                        .in_context(DeclContext::Aggregate(owner)),
                )
            })
            .collect()
    }

    /// Start the body of a declared function
    pub fn function(&mut self, decl: DeclUid) -> FunctionBuilder<'_> {
        FunctionBuilder {
            builder: self,
            body: FunctionBody::new(decl),
            current_block: None,
        }
    }

    pub fn finish(self) -> TranslationUnit {
        self.unit
    }
}

/// Builder for one function body; the body is appended to the unit on
/// `finish`
pub struct FunctionBuilder<'a> {
    builder: &'a mut UnitBuilder,
    body: FunctionBody,
    current_block: Option<BlockId>,
}

impl FunctionBuilder<'_> {
    pub fn param(&mut self, name: &str, ty: TypeNode) -> DeclUid {
        let uid = self.builder.new_decl_uid();
        let decl = DeclNode::new(uid, Some(name), DeclKind::Parameter, ty)
            .in_context(DeclContext::Function(self.body.decl));
        self.body.params.push(self.builder.add_decl(decl));
        uid
    }

    pub fn local(&mut self, name: Option<&str>, ty: TypeNode) -> DeclUid {
        let uid = self.builder.new_decl_uid();
        let decl = DeclNode::new(uid, name, DeclKind::Variable, ty)
            .in_context(DeclContext::Function(self.body.decl));
        self.body.locals.push(self.builder.add_decl(decl));
        uid
    }

    /// Function-local variable with static storage
    pub fn static_local(&mut self, name: &str, ty: TypeNode) -> DeclUid {
        let uid = self.local(Some(name), ty);
        if let Some(decl) = self.builder.decl_mut(uid) {
            decl.persistent = true;
        }
        uid
    }

    /// Result slot of the function
    pub fn result(&mut self, ty: TypeNode) -> DeclUid {
        let uid = self.builder.new_decl_uid();
        let decl = DeclNode::new(uid, None, DeclKind::Result, ty)
            .in_context(DeclContext::Function(self.body.decl));
        self.builder.add_decl(decl)
    }

    /// Append a block and make it current; the first block is the entry
    pub fn create_block(&mut self, id: BlockId) -> &mut Self {
        if self.body.blocks.is_empty() {
            self.body.entry = id;
        }
        self.body.blocks.push(BasicBlock::new(id));
        self.current_block = Some(id);
        self
    }

    pub fn switch_to(&mut self, id: BlockId) -> Result<&mut Self> {
        if self.body.get_block(id).is_none() {
            return Err(LighthouseError::unsupported("block", format!("no block {id} in function")));
        }
        self.current_block = Some(id);
        Ok(self)
    }

    pub fn push(&mut self, stmt: Statement) -> Result<&mut Self> {
        self.current()?.add_statement(stmt);
        Ok(self)
    }

    pub fn edge(&mut self, target: BlockId, flags: EdgeFlags) -> Result<&mut Self> {
        self.current()?.add_edge(target, flags);
        Ok(self)
    }

    pub fn span(&mut self, begin: u32, end: u32) -> &mut Self {
        self.body.body_begin = begin;
        self.body.body_end = end;
        self
    }

    pub fn located(&mut self, location: SourceLocation) -> &mut Self {
        if let Some(decl) = self.builder.decl_mut(self.body.decl) {
            decl.location = Some(location);
        }
        self
    }

    fn current(&mut self) -> Result<&mut BasicBlock> {
        let id = self
            .current_block
            .ok_or_else(|| LighthouseError::unsupported("block", "no current block"))?;
        self.body
            .get_block_mut(id)
            .ok_or_else(|| LighthouseError::unsupported("block", format!("no block {id} in function")))
    }

    pub fn finish(self) -> DeclUid {
        let decl = self.body.decl;
        self.builder.unit.add_function(self.body);
        decl
    }
}
