//! Verification of saved search output.
//!
//! Accepts the text written by a search (possibly concatenated from several
//! sharded runs), re-validates every covering line against the corpus, drops
//! permutations of lines already seen, and expands anagram variants.

use std::io::BufRead;

use rustc_hash::FxHashSet;

use crate::corpus::Corpus;
use crate::error::Result;
use crate::letters::LetterSet;

/// Result of checking a results file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Checked {
    /// Kept lines, covering sets in canonical (sorted) word order, with
    /// variants shown as `[VIGOR|VIRGO]`.
    pub lines: Vec<String>,
    /// Covering sets counting every spelling combination.
    pub total: u64,
    /// Covering lines that failed validation or were duplicates.
    pub rejected: usize,
    /// Distinct corpus entries appearing in the kept covering sets.
    pub words_used: usize,
}

/// Checks results for covering sets of `depth` words over `alphabet`.
///
/// Summary lines (`# WORD = N`) are kept with their word expanded; other
/// lines that are not `depth` words long are ignored.
pub fn check<R: BufRead>(
    reader: R,
    corpus: &Corpus,
    alphabet: LetterSet,
    depth: usize,
) -> Result<Checked> {
    let mut checked = Checked::default();
    let mut seen: FxHashSet<Vec<usize>> = FxHashSet::default();
    let mut used: FxHashSet<usize> = FxHashSet::default();

    for line in reader.lines() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if let ["#", word, "=", count] = tokens.as_slice() {
            let word = match corpus.find(word) {
                Some(index) => corpus.word(index).with_variants(),
                None => word.to_string(),
            };
            checked.lines.push(format!("# {word} = {count}"));
            continue;
        }
        if tokens.len() != depth {
            continue;
        }

        let mut indices = Vec::with_capacity(depth);
        let mut letters = LetterSet::EMPTY;
        for token in &tokens {
            let Some(index) = corpus.find(token) else {
                log::warn!("!WORD NOT FOUND: {token}");
                break;
            };
            indices.push(index);
            letters = letters.union(corpus.word(index).letters);
        }
        if indices.len() != depth {
            log::warn!("!SOME WORDS NOT FOUND: {line}");
            checked.rejected += 1;
            continue;
        }
        if !letters.contains_all(alphabet) {
            log::warn!("!NOT A COVERING SET: {line}");
            checked.rejected += 1;
            continue;
        }

        indices.sort_unstable();
        if !seen.insert(indices.clone()) {
            log::warn!("!DUPLICATE: {line}");
            checked.rejected += 1;
            continue;
        }

        used.extend(indices.iter().copied());
        let words: Vec<String> = indices
            .iter()
            .map(|&index| corpus.word(index).with_variants())
            .collect();
        checked.lines.push(words.join(" "));
        checked.total += indices
            .iter()
            .map(|&index| corpus.word(index).spellings() as u64)
            .product::<u64>();
    }

    checked.words_used = used.len();
    Ok(checked)
}
