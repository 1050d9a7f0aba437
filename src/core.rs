use std::hash::Hash;

use thiserror::Error;

/// Atomic unit of a scanned sequence. Bytes, chars and interned token ids
/// all qualify; the blanket impl means callers never implement this by hand.
pub trait Symbol: Copy + Eq + Hash {}

impl<T: Copy + Eq + Hash> Symbol for T {}

/// Stable identifier assigned to a pattern at registration, in registration order.
pub type PatternId = u32;

/// A confirmed occurrence of one pattern within one input.
/// `start..end` is a half-open range in symbol-index coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub pattern: PatternId,
    pub start: usize,
    pub end: usize,
}

impl Match {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// What a resolved span covers: one selected pattern occurrence, or input
/// that no selected match claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind<L> {
    Matched { pattern: PatternId, label: L },
    Gap,
}

/// A non-overlapping region of a segmented input. A full segmentation is
/// contiguous: spans are ordered by start, the first starts at 0, the last
/// ends at the input length, and adjacent spans abut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<L> {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind<L>,
}

impl<L> Span<L> {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_gap(&self) -> bool {
        matches!(self.kind, SpanKind::Gap)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Empty patterns are rejected at registration.
    #[error("patterns must contain at least one symbol")]
    InvalidPattern,
    /// An index build was attempted over zero registered patterns.
    #[error("cannot build an index over an empty pattern set")]
    EmptyPatternSet,
    /// A scan or segmentation was requested before the pattern set was compiled.
    #[error("the pattern set has not been compiled yet")]
    NotReady,
    /// Registration was attempted after the pattern set was compiled.
    #[error("the pattern set is frozen; no further patterns can be registered")]
    Frozen,
    /// A match's offsets fall outside the scanned input. This is a defensive
    /// check in the segmenter; it cannot arise from matches produced by
    /// scanning the same input.
    #[error("match {start}..{end} is inconsistent with input of length {input_len}")]
    InconsistentMatch {
        start: usize,
        end: usize,
        input_len: usize,
    },
}

/// How competing matches that share a start offset are ordered during
/// resolution. Pattern id ascending is always the final tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Longer match first, then higher priority. The default ("maximal munch").
    LongestFirst,
    /// Higher priority first, then longer match.
    PriorityFirst,
}

/// Configuration for the segmenter's resolution policy.
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    pub tie_break: TieBreak,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        SegmentConfig {
            tie_break: TieBreak::LongestFirst,
        }
    }
}
