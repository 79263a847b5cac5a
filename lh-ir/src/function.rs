//! Function bodies

use crate::BasicBlock;
use lh_common::{BlockId, DeclUid};
use serde::{Deserialize, Serialize};

/// One function as handed over by the host after CFG construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionBody {
    /// The function's own declaration (name, location, type)
    pub decl: DeclUid,
    pub params: Vec<DeclUid>,
    /// Function-local declarations in declaration order
    pub locals: Vec<DeclUid>,
    /// Blocks in host order
    pub blocks: Vec<BasicBlock>,
    pub entry: BlockId,
    #[serde(default)]
    pub body_begin: u32,
    #[serde(default)]
    pub body_end: u32,
    /// Function uses `va_start`
    #[serde(default)]
    pub stdarg: bool,
}

impl FunctionBody {
    pub fn new(decl: DeclUid) -> Self {
        Self {
            decl,
            params: Vec::new(),
            locals: Vec::new(),
            blocks: Vec::new(),
            entry: 0,
            body_begin: 0,
            body_end: 0,
            stdarg: false,
        }
    }

    pub fn get_block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn get_block_mut(&mut self, id: BlockId) -> Option<&mut BasicBlock> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }
}
