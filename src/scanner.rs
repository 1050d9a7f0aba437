use crate::automaton::{Automaton, ROOT};
use crate::core::{Match, PatternId, Symbol};

/// Start a scan of `input` against a compiled index. Each call begins at the
/// root; the returned iterator holds the only mutable state of the scan, so
/// any number of scans over the same index may run concurrently.
pub fn scan<'a, S: Symbol>(index: &'a Automaton<S>, input: &'a [S]) -> Matches<'a, S> {
    Matches {
        index,
        input,
        state: ROOT,
        pos: 0,
        pending: &[],
    }
}

/// Lazy match stream over one input. Pull-based with cooperative single-step
/// suspension: each `next` either drains one pending suffix-match from the
/// current state or advances the automaton by exactly one symbol, so dropping
/// the iterator early never scans the remainder of the input.
///
/// Matches are produced in non-decreasing `end` order. The order among
/// matches sharing an `end` is an implementation detail; the segmenter is
/// responsible for imposing a deterministic resolution order.
pub struct Matches<'a, S> {
    index: &'a Automaton<S>,
    input: &'a [S],
    state: u32,
    pos: usize,
    /// Terminal ids of the current state not yet emitted.
    pending: &'a [PatternId],
}

impl<'a, S: Symbol> Matches<'a, S> {
    /// Offset of the next symbol the scan will consume.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a, S: Symbol> Iterator for Matches<'a, S> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        loop {
            if let Some((&id, rest)) = self.pending.split_first() {
                self.pending = rest;
                crate::instrumentation::add_matches(1);
                return Some(Match {
                    pattern: id,
                    start: self.pos - self.index.pattern_len(id),
                    end: self.pos,
                });
            }
            if self.pos >= self.input.len() {
                return None;
            }
            self.state = self.index.next_state(self.state, self.input[self.pos]);
            self.pos += 1;
            self.pending = self.index.output(self.state);
            crate::instrumentation::add_steps(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PatternStore;

    fn index_of(patterns: &[&[u8]]) -> Automaton<u8> {
        let mut store = PatternStore::new();
        for (i, p) in patterns.iter().enumerate() {
            store.register(p.to_vec(), i, 0).unwrap();
        }
        Automaton::build(&store.freeze()).unwrap()
    }

    #[test]
    fn reports_every_occurrence_with_exact_offsets() {
        let index = index_of(&[b"he", b"she", b"his", b"hers"]);
        let input = b"ushers";
        let matches: Vec<Match> = scan(&index, input).collect();

        let expected = [
            Match { pattern: 1, start: 1, end: 4 }, // she
            Match { pattern: 0, start: 2, end: 4 }, // he
            Match { pattern: 3, start: 2, end: 6 }, // hers
        ];
        assert_eq!(matches.len(), expected.len());
        for m in &expected {
            assert!(matches.contains(m), "missing {m:?}");
        }
        // Matched text equals the registered pattern, verbatim.
        for m in &matches {
            let text = &input[m.start..m.end];
            let pattern: &[u8] = [b"he".as_slice(), b"she", b"his", b"hers"][m.pattern as usize];
            assert_eq!(text, pattern);
        }
    }

    #[test]
    fn ends_are_non_decreasing() {
        let index = index_of(&[b"a", b"ab", b"b", b"aba"]);
        let matches: Vec<Match> = scan(&index, b"ababab").collect();
        for pair in matches.windows(2) {
            assert!(pair[0].end <= pair[1].end);
        }
    }

    #[test]
    fn empty_input_yields_no_matches() {
        let index = index_of(&[b"x"]);
        assert_eq!(scan(&index, b"").count(), 0);
    }

    #[test]
    fn overlapping_and_nested_matches_are_all_reported() {
        let index = index_of(&[b"a", b"ab", b"b"]);
        let matches: Vec<Match> = scan(&index, b"ab").collect();
        let expected = [
            Match { pattern: 0, start: 0, end: 1 },
            Match { pattern: 1, start: 0, end: 2 },
            Match { pattern: 2, start: 1, end: 2 },
        ];
        assert_eq!(matches.len(), 3);
        for m in &expected {
            assert!(matches.contains(m));
        }
    }

    #[test]
    fn early_termination_stops_at_the_first_match() {
        let index = index_of(&[b"ab"]);
        let input = b"abxxxxxxxxxxxxxxab";
        let mut matches = scan(&index, input);
        let first = matches.next().unwrap();
        assert_eq!((first.start, first.end), (0, 2));
        // Only the matched prefix has been consumed.
        assert_eq!(matches.position(), 2);
    }

    #[test]
    fn duplicate_patterns_each_produce_a_match() {
        let index = index_of(&[b"aa", b"aa"]);
        let matches: Vec<Match> = scan(&index, b"aa").collect();
        let mut ids: Vec<_> = matches.iter().map(|m| m.pattern).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn restarting_requires_a_fresh_scan_call() {
        let index = index_of(&[b"ab"]);
        let input = b"abab";
        assert_eq!(scan(&index, input).count(), 2);
        // A consumed iterator is spent; a new call starts over at the root.
        let mut spent = scan(&index, input);
        while spent.next().is_some() {}
        assert_eq!(spent.next(), None);
        assert_eq!(scan(&index, input).count(), 2);
    }
}
