// Lightweight instrumentation for counting hotspots in development.
// Thread-local cells keep the scan loop free of synchronization and let
// concurrent scans count independently; reset and snapshot helpers allow a
// small dev binary to collect simple breakdowns.
use std::cell::Cell;

thread_local! {
    static STATES_BUILT: Cell<u64> = Cell::new(0);
    static BUILD_NS: Cell<u64> = Cell::new(0);
    static SCAN_STEPS: Cell<u64> = Cell::new(0);
    static FAIL_HOPS: Cell<u64> = Cell::new(0);
    static MATCHES_EMITTED: Cell<u64> = Cell::new(0);
    static CANDIDATES_RESOLVED: Cell<u64> = Cell::new(0);
    static RESOLVE_NS: Cell<u64> = Cell::new(0);
}

pub fn reset_counters() {
    STATES_BUILT.with(|c| c.set(0));
    BUILD_NS.with(|c| c.set(0));
    SCAN_STEPS.with(|c| c.set(0));
    FAIL_HOPS.with(|c| c.set(0));
    MATCHES_EMITTED.with(|c| c.set(0));
    CANDIDATES_RESOLVED.with(|c| c.set(0));
    RESOLVE_NS.with(|c| c.set(0));
}

/// (states_built, build_ns, scan_steps, fail_hops, matches_emitted,
/// candidates_resolved, resolve_ns)
pub fn counters_snapshot() -> (u64, u64, u64, u64, u64, u64, u64) {
    let st = STATES_BUILT.with(|c| c.get());
    let bn = BUILD_NS.with(|c| c.get());
    let sp = SCAN_STEPS.with(|c| c.get());
    let fh = FAIL_HOPS.with(|c| c.get());
    let me = MATCHES_EMITTED.with(|c| c.get());
    let cr = CANDIDATES_RESOLVED.with(|c| c.get());
    let rn = RESOLVE_NS.with(|c| c.get());
    (st, bn, sp, fh, me, cr, rn)
}

pub fn add_states(n: u64) {
    STATES_BUILT.with(|c| c.set(c.get().wrapping_add(n)));
}
pub fn add_build_ns(n: u64) {
    BUILD_NS.with(|c| c.set(c.get().wrapping_add(n)));
}
pub fn add_steps(n: u64) {
    SCAN_STEPS.with(|c| c.set(c.get().wrapping_add(n)));
}
pub fn add_fail_hops(n: u64) {
    FAIL_HOPS.with(|c| c.set(c.get().wrapping_add(n)));
}
pub fn add_matches(n: u64) {
    MATCHES_EMITTED.with(|c| c.set(c.get().wrapping_add(n)));
}
pub fn add_candidates(n: u64) {
    CANDIDATES_RESOLVED.with(|c| c.set(c.get().wrapping_add(n)));
}
pub fn add_resolve_ns(n: u64) {
    RESOLVE_NS.with(|c| c.set(c.get().wrapping_add(n)));
}
