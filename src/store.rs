use crate::core::{Error, PatternId, Symbol};

pub(crate) struct PatternEntry<S, L> {
    pub symbols: Vec<S>,
    pub label: L,
    pub priority: i32,
}

/// Mutable, single-writer registration phase. Patterns accumulate here until
/// `freeze` produces the immutable snapshot the automaton is built from.
pub struct PatternStore<S, L> {
    entries: Vec<PatternEntry<S, L>>,
}

impl<S: Symbol, L> PatternStore<S, L> {
    pub fn new() -> Self {
        PatternStore {
            entries: Vec::new(),
        }
    }

    /// Pre-size the store for a known pattern count.
    pub fn with_capacity(num_patterns: usize) -> Self {
        PatternStore {
            entries: Vec::with_capacity(num_patterns),
        }
    }

    /// Append a pattern and return its id. Ids are dense and assigned in
    /// registration order. Duplicate patterns are permitted and create
    /// independent entries.
    pub fn register(
        &mut self,
        symbols: impl IntoIterator<Item = S>,
        label: L,
        priority: i32,
    ) -> Result<PatternId, Error> {
        let symbols: Vec<S> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(Error::InvalidPattern);
        }
        let id = self.entries.len() as PatternId;
        self.entries.push(PatternEntry {
            symbols,
            label,
            priority,
        });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One-way transition to the read-only snapshot. Consuming `self` is what
    /// enforces the single-writer phase: no registration handle survives.
    pub fn freeze(self) -> FrozenPatternSet<S, L> {
        FrozenPatternSet {
            entries: self.entries,
        }
    }
}

impl<S: Symbol, L> Default for PatternStore<S, L> {
    fn default() -> Self {
        PatternStore::new()
    }
}

/// Immutable snapshot of a pattern set. Trivially shareable across threads
/// once built; the automaton borrows pattern lengths and the segmenter
/// borrows labels and priorities from here.
pub struct FrozenPatternSet<S, L> {
    entries: Vec<PatternEntry<S, L>>,
}

impl<S: Symbol, L> FrozenPatternSet<S, L> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn symbols(&self, id: PatternId) -> &[S] {
        &self.entries[id as usize].symbols
    }

    pub fn pattern_len(&self, id: PatternId) -> usize {
        self.entries[id as usize].symbols.len()
    }

    pub fn label(&self, id: PatternId) -> &L {
        &self.entries[id as usize].label
    }

    pub fn priority(&self, id: PatternId) -> i32 {
        self.entries[id as usize].priority
    }

    pub fn ids(&self) -> impl Iterator<Item = PatternId> + '_ {
        (0..self.entries.len()).map(|i| i as PatternId)
    }
}
