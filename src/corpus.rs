//! The word corpus searched for covering sets.
//!
//! Words are uppercased, sorted, and collapsed by letter set: of all the
//! words sharing one set of letters only the alphabetically first is kept,
//! the others are remembered as its variants. Index 0 holds an empty
//! sentinel word so that real words are numbered from 1.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::letters::LetterSet;

/// A word of the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub letters: LetterSet,
    /// Other spellings with exactly the same letter set, sorted.
    pub variants: Vec<String>,
}

impl Word {
    /// Number of distinct spellings this entry stands for.
    pub fn spellings(&self) -> usize {
        1 + self.variants.len()
    }

    /// Formats the word with its variants as `[VIGOR|VIRGO]`, or just the
    /// text when it has none.
    pub fn with_variants(&self) -> String {
        if self.variants.is_empty() {
            return self.text.clone();
        }
        let mut out = format!("[{}", self.text);
        for variant in &self.variants {
            out.push('|');
            out.push_str(variant);
        }
        out.push(']');
        out
    }
}

/// An ordered, letter-set-deduplicated word list.
#[derive(Debug, Clone)]
pub struct Corpus {
    words: Vec<Word>,
    by_text: FxHashMap<String, usize>,
}

impl Corpus {
    /// Largest number of words; higher indices would collide with the
    /// prune cache's sentinel values.
    pub const MAX_WORDS: usize = 0xFFFD;

    /// Builds a corpus from arbitrary words.
    ///
    /// Words are uppercased; words containing non-letters are dropped.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut texts: Vec<(String, LetterSet)> = words
            .into_iter()
            .filter_map(|w| {
                let text = w.as_ref().trim().to_ascii_uppercase();
                let letters = LetterSet::from_word(&text).filter(|set| !set.is_empty())?;
                Some((text, letters))
            })
            .collect();
        texts.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        texts.dedup_by(|a, b| a.0 == b.0);

        let mut entries = vec![Word::default()];
        let mut by_letters: FxHashMap<LetterSet, usize> = FxHashMap::default();
        let mut by_text: FxHashMap<String, usize> = FxHashMap::default();

        for (text, letters) in texts {
            // sorted input: the first spelling seen becomes the entry
            let index = *by_letters.entry(letters).or_insert_with(|| {
                entries.push(Word {
                    text: text.clone(),
                    letters,
                    variants: Vec::new(),
                });
                entries.len() - 1
            });
            if entries[index].text != text {
                entries[index].variants.push(text.clone());
            }
            by_text.insert(text, index);
        }

        let len = entries.len() - 1;
        if len > Self::MAX_WORDS {
            return Err(Error::CorpusTooLarge {
                len,
                max: Self::MAX_WORDS,
            });
        }

        Ok(Self {
            words: entries,
            by_text,
        })
    }

    /// Reads one word per line, keeping only alphabetic words of `word_len`
    /// letters. Blank lines and lines starting with `#` are skipped.
    pub fn read<R: BufRead>(reader: R, word_len: usize) -> Result<Self> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            if word.len() == word_len && word.bytes().all(|c| c.is_ascii_alphabetic()) {
                words.push(word.to_string());
            }
        }
        Self::from_words(words)
    }

    /// Loads a word list file, see [`Corpus::read`].
    pub fn load(path: impl AsRef<Path>, word_len: usize) -> Result<Self> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file), word_len)
    }

    /// Number of real words (the sentinel is not counted).
    pub fn len(&self) -> usize {
        self.words.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Valid word indices, in search order.
    #[inline]
    pub fn indices(&self) -> Range<usize> {
        1..self.words.len()
    }

    /// Returns the word at `index`; index 0 is the empty sentinel.
    #[inline(always)]
    pub fn word(&self, index: usize) -> &Word {
        &self.words[index]
    }

    /// Iterates `(index, word)` pairs of the real words.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Word)> {
        self.words.iter().enumerate().skip(1)
    }

    /// Looks up a spelling, returning the index of the entry standing for
    /// it (variants map to their representative).
    pub fn find(&self, text: &str) -> Option<usize> {
        self.by_text.get(&text.to_ascii_uppercase()).copied()
    }

    /// Total number of raw spellings, variants included.
    pub fn spellings(&self) -> usize {
        self.by_text.len()
    }

    /// Largest number of distinct letters in any single word.
    pub fn max_letters(&self) -> u32 {
        self.iter().map(|(_, w)| w.letters.len()).max().unwrap_or(0)
    }

    /// Returns true if every word has at least one letter of `set`.
    pub fn all_intersect(&self, set: LetterSet) -> bool {
        self.iter().all(|(_, w)| w.letters.intersects(set))
    }
}
