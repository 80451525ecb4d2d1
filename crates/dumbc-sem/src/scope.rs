//! The generic lexically-scoped symbol table shared by variable type
//! environments and function tables: a stack of name→value maps.
//!
//! Lookups search top-to-bottom; writes always land in the top frame.
//! [`SymbolTable::scoped`] returns a guard that pops on every exit path
//! (including `?`-propagated errors), so a pass body never has to
//! remember to balance its own `push`/`pop` calls.

use dumbc_util::Symbol;
use rustc_hash::FxHashMap;

pub struct SymbolTable<V> {
    frames: Vec<FxHashMap<Symbol, V>>,
}

impl<V> SymbolTable<V> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub fn pop(&mut self) -> Option<FxHashMap<Symbol, V>> {
        self.frames.pop()
    }

    pub fn has(&self, key: Symbol) -> bool {
        self.frames.iter().rev().any(|frame| frame.contains_key(&key))
    }

    /// Writes to the top frame only. Panics if no scope is active —
    /// every caller pushes one before visiting a function or block body.
    pub fn set(&mut self, key: Symbol, value: V) {
        self.frames.last_mut().expect("SymbolTable::set with no active scope").insert(key, value);
    }

    /// Pushes a new frame and returns a guard that pops it on drop.
    pub fn scoped(&mut self) -> ScopeGuard<'_, V> {
        self.push();
        ScopeGuard { table: self }
    }
}

impl<V: Copy> SymbolTable<V> {
    pub fn get(&self, key: Symbol) -> Option<V> {
        self.frames.iter().rev().find_map(|frame| frame.get(&key).copied())
    }
}

impl<V> Default for SymbolTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ScopeGuard<'a, V> {
    table: &'a mut SymbolTable<V>,
}

impl<V> Drop for ScopeGuard<'_, V> {
    fn drop(&mut self) {
        self.table.pop();
    }
}

impl<V> std::ops::Deref for ScopeGuard<'_, V> {
    type Target = SymbolTable<V>;
    fn deref(&self) -> &Self::Target {
        self.table
    }
}

impl<V> std::ops::DerefMut for ScopeGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.table
    }
}
