// Dev binary: build fixture workloads at a few sizes and print the
// instrumentation counters, to keep an eye on automaton size, failure-link
// traffic and resolution cost while tuning.
use std::time::Instant;

use spanmatch::fixture::{generate_patterns, generate_text};
use spanmatch::{Matcher, instrumentation};

fn run_case(num_patterns: usize, max_pattern_len: usize, text_len: usize) {
    instrumentation::reset_counters();

    let mut matcher: Matcher<u8, usize> = Matcher::new();
    for (i, pattern) in generate_patterns(42, num_patterns, max_pattern_len)
        .into_iter()
        .enumerate()
    {
        matcher
            .add_pattern(pattern, i, 0)
            .expect("fixture patterns are non-empty");
    }
    matcher.compile().expect("fixture pattern set is non-empty");

    let text = generate_text(7, text_len);
    let t0 = Instant::now();
    let spans = matcher.segment(&text).expect("compiled matcher");
    let dur = t0.elapsed();

    let (states, build_ns, steps, fail_hops, matches, candidates, resolve_ns) =
        instrumentation::counters_snapshot();
    println!(
        "patterns={num_patterns} max_len={max_pattern_len} text={text_len} \
         segment_time={dur:?} spans={} states={states} build_ns={build_ns} \
         steps={steps} fail_hops={fail_hops} matches={matches} \
         candidates={candidates} resolve_ns={resolve_ns}",
        spans.len(),
    );
}

fn main() {
    let pattern_counts = [10usize, 100, 1000];
    let text_lens = [10_000usize, 100_000];
    for &n in &pattern_counts {
        for &len in &text_lens {
            run_case(n, 8, len);
        }
    }
}
