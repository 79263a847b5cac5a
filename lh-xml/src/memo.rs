//! Identity memo
//! 
//! Records which uids have already been emitted. One instance tracks
//! aggregate types for the whole unit, another tracks external
//! declarations and is reset at every function boundary.

use log::trace;
use rustc_hash::FxHashSet;

#[derive(Debug, Default)]
pub struct UidMemo {
    seen: FxHashSet<u32>,
}

impl UidMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, uid: u32) -> bool {
        self.seen.contains(&uid)
    }

    /// Record `uid`; returns `true` on its first addition
    pub fn add(&mut self, uid: u32) -> bool {
        let fresh = self.seen.insert(uid);
        if !fresh {
            trace!("uid {uid} already memoized");
        }
        fresh
    }

    /// Forget every uid but keep the allocation
    pub fn reset(&mut self) {
        self.seen.clear();
    }

    /// Forget every uid and release the storage
    pub fn destroy(&mut self) {
        self.seen = FxHashSet::default();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.seen.capacity()
    }
}
