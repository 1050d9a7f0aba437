use std::cmp::Reverse;
use std::time::Instant;

use crate::automaton::Automaton;
use crate::core::{Error, Match, SegmentConfig, Span, SpanKind, Symbol, TieBreak};
use crate::scanner::scan;
use crate::store::FrozenPatternSet;

/// Scan `input` and resolve the matches into a full partition. Convenience
/// over `resolve` for callers that do not need the raw match stream.
pub fn segment<S: Symbol, L: Clone>(
    index: &Automaton<S>,
    patterns: &FrozenPatternSet<S, L>,
    config: &SegmentConfig,
    input: &[S],
) -> Result<Vec<Span<L>>, Error> {
    let matches: Vec<Match> = scan(index, input).collect();
    resolve(matches, patterns, config, input.len())
}

/// Resolve a drained match collection into a partition of an input of length
/// `input_len`: contiguous, ordered spans from 0 to `input_len`, each either
/// one selected match or a gap.
///
/// The policy is a greedy interval-scheduling variant, O(M log M) in the
/// number of matches: candidates are ordered by start offset, the configured
/// tie-break, and finally pattern id; selection walks left to right and
/// rejects anything overlapping an already-selected span. The match stream
/// must be fully drained first because a later, longer candidate can win a
/// start offset an earlier one also claims.
pub fn resolve<S: Symbol, L: Clone>(
    mut matches: Vec<Match>,
    patterns: &FrozenPatternSet<S, L>,
    config: &SegmentConfig,
    input_len: usize,
) -> Result<Vec<Span<L>>, Error> {
    for m in &matches {
        if m.start > m.end || m.end > input_len {
            return Err(Error::InconsistentMatch {
                start: m.start,
                end: m.end,
                input_len,
            });
        }
    }
    let t0 = Instant::now();
    crate::instrumentation::add_candidates(matches.len() as u64);

    match config.tie_break {
        TieBreak::LongestFirst => matches.sort_by_key(|m| {
            (
                m.start,
                Reverse(m.len()),
                Reverse(patterns.priority(m.pattern)),
                m.pattern,
            )
        }),
        TieBreak::PriorityFirst => matches.sort_by_key(|m| {
            (
                m.start,
                Reverse(patterns.priority(m.pattern)),
                Reverse(m.len()),
                m.pattern,
            )
        }),
    }

    let mut spans: Vec<Span<L>> = Vec::new();
    let mut cursor = 0usize;
    for m in &matches {
        // Overlaps something already selected.
        if m.start < cursor {
            continue;
        }
        if m.start > cursor {
            spans.push(Span {
                start: cursor,
                end: m.start,
                kind: SpanKind::Gap,
            });
        }
        spans.push(Span {
            start: m.start,
            end: m.end,
            kind: SpanKind::Matched {
                pattern: m.pattern,
                label: patterns.label(m.pattern).clone(),
            },
        });
        cursor = m.end;
    }
    if cursor < input_len {
        spans.push(Span {
            start: cursor,
            end: input_len,
            kind: SpanKind::Gap,
        });
    }

    crate::instrumentation::add_resolve_ns(t0.elapsed().as_nanos() as u64);
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PatternStore;

    fn compiled(
        patterns: &[(&[u8], &'static str, i32)],
    ) -> (Automaton<u8>, FrozenPatternSet<u8, &'static str>) {
        let mut store = PatternStore::new();
        for &(p, label, priority) in patterns {
            store.register(p.to_vec(), label, priority).unwrap();
        }
        let frozen = store.freeze();
        let index = Automaton::build(&frozen).unwrap();
        (index, frozen)
    }

    fn assert_partitions<L>(spans: &[Span<L>], input_len: usize) {
        assert_eq!(spans.first().map(|s| s.start), Some(0));
        assert_eq!(spans.last().map(|s| s.end), Some(input_len));
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for span in spans {
            assert!(span.start < span.end, "zero-length span in partition");
        }
    }

    #[test]
    fn longer_match_wins_at_the_same_start() {
        let (index, frozen) = compiled(&[(b"a", "a", 0), (b"ab", "ab", 0), (b"b", "b", 0)]);
        let spans = segment(&index, &frozen, &SegmentConfig::default(), b"ab").unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(
            spans[0],
            Span {
                start: 0,
                end: 2,
                kind: SpanKind::Matched { pattern: 1, label: "ab" },
            }
        );
    }

    #[test]
    fn priority_breaks_ties_at_the_same_start_only() {
        // "at" outranks "cat" on priority but starts later, so the greedy
        // left-to-right pass still selects "cat".
        let (index, frozen) = compiled(&[(b"cat", "cat", 0), (b"at", "at", 5)]);
        let input = b"concatenate";
        let spans = segment(&index, &frozen, &SegmentConfig::default(), input).unwrap();
        assert_partitions(&spans, input.len());

        let matched: Vec<_> = spans.iter().filter(|s| !s.is_gap()).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!((matched[0].start, matched[0].end), (3, 6));
        assert_eq!(
            matched[0].kind,
            SpanKind::Matched { pattern: 0, label: "cat" }
        );
    }

    #[test]
    fn priority_decides_between_equal_length_candidates() {
        let (index, frozen) = compiled(&[(b"ab", "low", 0), (b"ab", "high", 9)]);
        let spans = segment(&index, &frozen, &SegmentConfig::default(), b"ab").unwrap();
        assert_eq!(
            spans[0].kind,
            SpanKind::Matched { pattern: 1, label: "high" }
        );
    }

    #[test]
    fn priority_first_tie_break_prefers_the_shorter_higher_priority_match() {
        let patterns: &[(&[u8], &str, i32)] = &[(b"abc", "long", 0), (b"ab", "short", 10)];
        let (index, frozen) = compiled(patterns);
        let input = b"abc";

        let default = segment(&index, &frozen, &SegmentConfig::default(), input).unwrap();
        assert_eq!(
            default[0].kind,
            SpanKind::Matched { pattern: 0, label: "long" }
        );

        let config = SegmentConfig {
            tie_break: TieBreak::PriorityFirst,
        };
        let spans = segment(&index, &frozen, &config, input).unwrap();
        assert_eq!(
            spans[0].kind,
            SpanKind::Matched { pattern: 1, label: "short" }
        );
        assert_partitions(&spans, input.len());
        assert!(spans[1].is_gap());
    }

    #[test]
    fn unmatched_input_is_a_single_gap() {
        let (index, frozen) = compiled(&[(b"zz", "zz", 0)]);
        let input = b"hello world";
        let spans = segment(&index, &frozen, &SegmentConfig::default(), input).unwrap();
        assert_eq!(
            spans,
            vec![Span {
                start: 0,
                end: input.len(),
                kind: SpanKind::Gap,
            }]
        );
    }

    #[test]
    fn empty_input_resolves_to_no_spans() {
        let (index, frozen) = compiled(&[(b"a", "a", 0)]);
        let spans = segment(&index, &frozen, &SegmentConfig::default(), b"").unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn gaps_fill_before_between_and_after_matches() {
        let (index, frozen) = compiled(&[(b"bb", "bb", 0)]);
        let input = b"a bb c bb d";
        let spans = segment(&index, &frozen, &SegmentConfig::default(), input).unwrap();
        assert_partitions(&spans, input.len());
        let kinds: Vec<bool> = spans.iter().map(|s| s.is_gap()).collect();
        assert_eq!(kinds, vec![true, false, true, false, true]);
    }

    #[test]
    fn segmentation_is_deterministic() {
        let (index, frozen) = compiled(&[(b"ab", "ab", 0), (b"ba", "ba", 0), (b"a", "a", 0)]);
        let input = b"ababab";
        let first = segment(&index, &frozen, &SegmentConfig::default(), input).unwrap();
        let second = segment(&index, &frozen, &SegmentConfig::default(), input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_matches_are_rejected() {
        let (_, frozen) = compiled(&[(b"ab", "ab", 0)]);
        let bogus = vec![Match {
            pattern: 0,
            start: 4,
            end: 6,
        }];
        let err = resolve(bogus, &frozen, &SegmentConfig::default(), 5).unwrap_err();
        assert_eq!(
            err,
            Error::InconsistentMatch {
                start: 4,
                end: 6,
                input_len: 5,
            }
        );
    }
}
