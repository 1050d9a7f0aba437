//! Multi-pattern matching and segmentation for symbol sequences.
//!
//! Callers register a set of patterns once, compile them into a shared
//! automaton, then repeatedly scan inputs for all pattern occurrences or
//! request a segmentation: a partition of the input into labeled, matched
//! spans and gaps. Scanning is a single pass in time linear in the input,
//! independent of how many patterns were registered.
//!
//! The pieces compose in one direction: [`PatternStore`] → freeze →
//! [`Automaton`] → [`scan`] → [`resolve`]/[`segment`]. The [`Matcher`]
//! facade wires them together for the common register/compile/scan flow, and
//! [`WordMatcher`] layers whitespace tokenization on top for word-level
//! phrase matching.

pub mod automaton;
pub mod core;
pub mod fixture;
pub mod instrumentation;
pub mod scanner;
pub mod segmenter;
pub mod store;
pub mod vocab;

pub use crate::automaton::Automaton;
pub use crate::core::{
    Error, Match, PatternId, SegmentConfig, Span, SpanKind, Symbol, TieBreak,
};
pub use crate::scanner::{Matches, scan};
pub use crate::segmenter::{resolve, segment};
pub use crate::store::{FrozenPatternSet, PatternStore};
pub use crate::vocab::{Vocabulary, WordMatcher};

struct Compiled<S, L> {
    patterns: FrozenPatternSet<S, L>,
    index: Automaton<S>,
}

/// Facade over the register → compile → scan/segment lifecycle.
///
/// Registration is a single-writer phase; `compile` freezes the pattern set
/// and builds the index, after which the matcher is read-only and shareable.
/// `store` and `compiled` are mutually exclusive: exactly one is populated
/// at any time.
pub struct Matcher<S, L> {
    store: Option<PatternStore<S, L>>,
    compiled: Option<Compiled<S, L>>,
    config: SegmentConfig,
}

impl<S: Symbol, L> Matcher<S, L> {
    pub fn new() -> Self {
        Matcher::with_config(SegmentConfig::default())
    }

    pub fn with_config(config: SegmentConfig) -> Self {
        Matcher {
            store: Some(PatternStore::new()),
            compiled: None,
            config,
        }
    }

    /// Register one pattern. Fails with `Frozen` once compiled and with
    /// `InvalidPattern` for an empty symbol sequence.
    pub fn add_pattern(
        &mut self,
        symbols: impl IntoIterator<Item = S>,
        label: L,
        priority: i32,
    ) -> Result<PatternId, Error> {
        match self.store.as_mut() {
            Some(store) => store.register(symbols, label, priority),
            None => Err(Error::Frozen),
        }
    }

    /// Freeze the pattern set and build the index. A second call is a no-op;
    /// compiling an empty store fails with `EmptyPatternSet` and leaves the
    /// store open for registration.
    pub fn compile(&mut self) -> Result<(), Error> {
        let Some(store) = self.store.take() else {
            return Ok(());
        };
        if store.is_empty() {
            self.store = Some(store);
            return Err(Error::EmptyPatternSet);
        }
        let patterns = store.freeze();
        let index = Automaton::build(&patterns)?;
        self.compiled = Some(Compiled { patterns, index });
        Ok(())
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// The compiled index, for callers driving `scan`/`segment` directly.
    pub fn index(&self) -> Result<&Automaton<S>, Error> {
        self.compiled
            .as_ref()
            .map(|c| &c.index)
            .ok_or(Error::NotReady)
    }

    /// The frozen pattern set backing the compiled index.
    pub fn pattern_set(&self) -> Result<&FrozenPatternSet<S, L>, Error> {
        self.compiled
            .as_ref()
            .map(|c| &c.patterns)
            .ok_or(Error::NotReady)
    }

    /// Lazily scan `input` for every pattern occurrence.
    pub fn scan<'a>(&'a self, input: &'a [S]) -> Result<Matches<'a, S>, Error> {
        let compiled = self.compiled.as_ref().ok_or(Error::NotReady)?;
        Ok(scanner::scan(&compiled.index, input))
    }
}

impl<S: Symbol, L: Clone> Matcher<S, L> {
    /// Scan `input` and resolve all matches into a full span partition.
    pub fn segment(&self, input: &[S]) -> Result<Vec<Span<L>>, Error> {
        let compiled = self.compiled.as_ref().ok_or(Error::NotReady)?;
        segmenter::segment(&compiled.index, &compiled.patterns, &self.config, input)
    }
}

impl<S: Symbol, L> Default for Matcher<S, L> {
    fn default() -> Self {
        Matcher::new()
    }
}
