// Automaton: explanatory notes
//
// The index is the classic multi-pattern automaton: a trie over all patterns
// with failure links computed by breadth-first traversal, held as a flat
// arena of states (`Vec<State>`) with transitions as index-to-index maps.
// The arena layout sidesteps the cyclic ownership that failure-link
// back-references would create with boxed nodes, and makes the whole
// structure a plain read-only value that any number of concurrent scans can
// share.
//
// 1. Trie: one state per distinct pattern prefix; each state that terminates
//    one or more patterns records their ids in its output set.
//
// 2. Failure links: for the state reached by symbol sequence s, the failure
//    link points to the state reached by the longest proper suffix of s that
//    is also a prefix of some pattern (the root if none). BFS order
//    guarantees a state's failure target is fully resolved before any state
//    that links to it.
//
// 3. Output propagation: each state's output set is extended with its
//    failure target's output set during the same BFS, so reaching a state
//    reports every pattern that is a suffix-match ending there. Own
//    terminals come first, inherited ones after, which orders each set
//    longest pattern first.
//
// Goto tables are per-state `AHashMap`s rather than dense 256-entry rows so
// the same automaton works for any symbol type (bytes, chars, interned token
// ids) and stays compact for large alphabets.
use std::collections::VecDeque;
use std::time::Instant;

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::core::{Error, PatternId, Symbol};
use crate::store::FrozenPatternSet;

pub(crate) const ROOT: u32 = 0;

struct State<S> {
    transitions: AHashMap<S, u32>,
    fail: u32,
    /// Pattern ids terminating at this state, including those inherited
    /// along failure links.
    output: SmallVec<[PatternId; 2]>,
}

impl<S: Symbol> State<S> {
    fn new() -> Self {
        State {
            transitions: AHashMap::new(),
            fail: ROOT,
            output: SmallVec::new(),
        }
    }
}

/// Compiled multi-pattern index. Built once from a frozen pattern set,
/// immutable and shareable across concurrent scans afterward.
pub struct Automaton<S> {
    states: Vec<State<S>>,
    pattern_lens: Vec<usize>,
}

impl<S: Symbol> Automaton<S> {
    /// Compile a frozen pattern set. Construction is O(total pattern length)
    /// map operations and deterministic: the same frozen set always yields an
    /// automaton with identical behavior.
    pub fn build<L>(patterns: &FrozenPatternSet<S, L>) -> Result<Automaton<S>, Error> {
        if patterns.is_empty() {
            return Err(Error::EmptyPatternSet);
        }
        let t0 = Instant::now();

        let mut states: Vec<State<S>> = vec![State::new()];

        // 1) trie over all patterns
        for id in patterns.ids() {
            let mut current = ROOT;
            for &sym in patterns.symbols(id) {
                current = match states[current as usize].transitions.get(&sym) {
                    Some(&next) => next,
                    None => {
                        let next = states.len() as u32;
                        states.push(State::new());
                        states[current as usize].transitions.insert(sym, next);
                        next
                    }
                };
            }
            // Duplicate patterns share a terminal state and each keep their id.
            states[current as usize].output.push(id);
        }

        // 2) failure links via BFS. Depth-1 states keep the root fallback
        // they were created with.
        let mut queue: VecDeque<u32> = states[ROOT as usize]
            .transitions
            .values()
            .copied()
            .collect();

        while let Some(current) = queue.pop_front() {
            let children: Vec<(S, u32)> = states[current as usize]
                .transitions
                .iter()
                .map(|(&sym, &next)| (sym, next))
                .collect();

            for (sym, next) in children {
                // Walk the parent's failure chain until a state with a
                // transition on `sym` appears, or the root is reached. The
                // chain only visits shallower states, so it can never land on
                // `next` itself.
                let mut probe = states[current as usize].fail;
                let fail_target = loop {
                    if let Some(&target) = states[probe as usize].transitions.get(&sym) {
                        break target;
                    }
                    if probe == ROOT {
                        break ROOT;
                    }
                    probe = states[probe as usize].fail;
                };
                states[next as usize].fail = fail_target;

                // 3) propagate suffix-match outputs. The target's own set is
                // already complete because BFS resolved it at a shallower depth.
                if !states[fail_target as usize].output.is_empty() {
                    let inherited = states[fail_target as usize].output.clone();
                    states[next as usize].output.extend(inherited);
                }
                queue.push_back(next);
            }
        }

        crate::instrumentation::add_states(states.len() as u64);
        crate::instrumentation::add_build_ns(t0.elapsed().as_nanos() as u64);

        let pattern_lens = patterns.ids().map(|id| patterns.pattern_len(id)).collect();
        Ok(Automaton {
            states,
            pattern_lens,
        })
    }

    /// Number of states in the arena, root included.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_lens.len()
    }

    /// Length of the pattern with the given id, so match starts can be
    /// recovered from end offsets without consulting the frozen set.
    pub fn pattern_len(&self, id: PatternId) -> usize {
        self.pattern_lens[id as usize]
    }

    /// One automaton step: follow the goto transition for `sym` if present,
    /// else fall back along failure links until one exists or the root
    /// absorbs the symbol. Never re-reads input, so scanning stays linear.
    pub(crate) fn next_state(&self, mut state: u32, sym: S) -> u32 {
        loop {
            if let Some(&next) = self.states[state as usize].transitions.get(&sym) {
                return next;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.states[state as usize].fail;
            crate::instrumentation::add_fail_hops(1);
        }
    }

    /// Every pattern id that is a suffix-match ending at this state.
    pub(crate) fn output(&self, state: u32) -> &[PatternId] {
        &self.states[state as usize].output
    }
}
