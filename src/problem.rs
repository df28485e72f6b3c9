//! Search problem definitions.

use crate::cache::PruneCache;
use crate::error::Result;
use crate::letters::{LetterSet, ALPHABET, VOWELS};

/// A covering-set problem with a compile-time number of words.
///
/// - `DEPTH`: how many words every covering set holds
/// - `alphabet`: the letters the words must cover together
/// - `vowels`: letters every word is expected to contain at least one of,
///   enabling the tight-bound pruning rule; `None` disables it
#[derive(Debug, Clone, Copy)]
pub struct Problem<const DEPTH: usize> {
    pub alphabet: LetterSet,
    pub vowels: Option<LetterSet>,
}

impl<const DEPTH: usize> Problem<DEPTH> {
    /// Creates a problem definition with compile-time validation.
    pub const fn new(alphabet: LetterSet, vowels: Option<LetterSet>) -> Self {
        assert!(DEPTH >= 1, "DEPTH must be at least 1");
        assert!(!alphabet.is_empty(), "alphabet must not be empty");
        assert!(alphabet.width() <= 26, "alphabet must be within A-Z");
        Self { alphabet, vowels }
    }

    /// Number of words in every covering set.
    pub const fn depth(&self) -> usize {
        DEPTH
    }

    /// Allocates a prune cache sized for this problem.
    pub fn cache(&self) -> Result<PruneCache> {
        PruneCache::new(DEPTH, self.alphabet.width())
    }
}

/// Words per covering set in the classic puzzle.
pub const PANGRAM_DEPTH: usize = 6;

/// Letters per word in the classic puzzle.
pub const PANGRAM_WORD_LEN: usize = 5;

/// Six five-letter words covering A-Z.
pub const PANGRAM: Problem<PANGRAM_DEPTH> = Problem::new(ALPHABET, Some(VOWELS));
