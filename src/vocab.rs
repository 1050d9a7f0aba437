use ahash::AHashMap;

use crate::core::{Error, PatternId, SegmentConfig, Span};
use crate::scanner::Matches;
use crate::Matcher;

/// Sentinel id for words never seen in any registered phrase. No pattern can
/// contain it (interned ids start at 1), so an unknown word always breaks a
/// match in progress.
pub const UNKNOWN_WORD: u32 = 0;

/// Interner mapping whitespace-delimited tokens to dense symbol ids.
#[derive(Default)]
pub struct Vocabulary {
    ids: AHashMap<String, u32>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Vocabulary {
            ids: AHashMap::new(),
        }
    }

    /// Id for `word`, allocating the next dense id on first sight.
    pub fn intern(&mut self, word: &str) -> u32 {
        if let Some(&id) = self.ids.get(word) {
            return id;
        }
        let id = self.ids.len() as u32 + 1;
        self.ids.insert(word.to_string(), id);
        id
    }

    pub fn lookup(&self, word: &str) -> Option<u32> {
        self.ids.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Phrase matching over word sequences: phrases are interned into `u32`
/// symbol ids and matched with the same automaton that handles bytes. All
/// offsets in matches and spans are word indices, not byte offsets.
pub struct WordMatcher<L> {
    matcher: Matcher<u32, L>,
    vocab: Vocabulary,
}

impl<L: Clone> WordMatcher<L> {
    pub fn new() -> Self {
        WordMatcher {
            matcher: Matcher::new(),
            vocab: Vocabulary::new(),
        }
    }

    pub fn with_config(config: SegmentConfig) -> Self {
        WordMatcher {
            matcher: Matcher::with_config(config),
            vocab: Vocabulary::new(),
        }
    }

    /// Register a phrase, split on whitespace. Fails with `InvalidPattern`
    /// if the phrase contains no words.
    pub fn add_phrase(&mut self, phrase: &str, label: L, priority: i32) -> Result<PatternId, Error> {
        let word_ids: Vec<u32> = phrase
            .split_whitespace()
            .map(|w| self.vocab.intern(w))
            .collect();
        self.matcher.add_pattern(word_ids, label, priority)
    }

    pub fn compile(&mut self) -> Result<(), Error> {
        self.matcher.compile()
    }

    /// Map text to the word-id sequence the matcher scans. Unknown words map
    /// to the sentinel, which matches nothing.
    pub fn tokenize(&self, text: &str) -> Vec<u32> {
        text.split_whitespace()
            .map(|w| self.vocab.lookup(w).unwrap_or(UNKNOWN_WORD))
            .collect()
    }

    pub fn scan<'a>(&'a self, words: &'a [u32]) -> Result<Matches<'a, u32>, Error> {
        self.matcher.scan(words)
    }

    /// Tokenize `text` and segment the word sequence. Span offsets count
    /// words.
    pub fn segment(&self, text: &str) -> Result<Vec<Span<L>>, Error> {
        let words = self.tokenize(text);
        self.matcher.segment(&words)
    }
}

impl<L: Clone> Default for WordMatcher<L> {
    fn default() -> Self {
        WordMatcher::new()
    }
}
