//! Memoized backtracking search for covering sets.
//!
//! Key optimizations:
//! - Letter sets as `u32` bitmasks, one AND-NOT per chosen word
//! - Words chosen in strictly increasing corpus order, so every set is
//!   visited once and never as a permutation
//! - Prune cache of proven dead ends per (level, remaining letters)
//! - Feasibility bound: the remaining slots must be able to remove the
//!   remaining letters
//! - Tight-bound vowel rule: with zero slack every remaining word needs a
//!   vowel of its own
//! - Fixed-size depth-indexed arrays, no allocation in the hot loop

use std::ops::ControlFlow;

use crate::cache::Memo;
use crate::control::{columns, Control, Hints, Request, Stats};
use crate::corpus::{Corpus, Word};
use crate::error::Result;
use crate::letters::LetterSet;
use crate::problem::Problem;
use crate::report::Report;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every candidate was explored.
    Exhausted,
    /// A stop was requested; the position was reported with `last`.
    Stopped,
}

/// What a finished subtree tells its parent.
#[derive(Debug, Clone, Copy)]
struct Subtree {
    /// Some covering set was found below.
    found: bool,
    /// No candidate below was skipped by a skip-to hint.
    complete: bool,
}

impl Subtree {
    const EMPTY: Self = Self {
        found: false,
        complete: true,
    };
}

/// A single search over a corpus.
///
/// Owns the memo, the word stack and the counters; the corpus and the
/// control token are borrowed.
pub struct Search<'a, const DEPTH: usize, M: Memo> {
    corpus: &'a Corpus,
    control: &'a Control,
    memo: M,
    alphabet: LetterSet,
    vowels: Option<LetterSet>,
    /// Most letters a single word can remove.
    letters_per_word: u32,
    hints: Hints<DEPTH>,
    /// Corpus index chosen at each level.
    stack: [usize; DEPTH],
    stats: Stats<DEPTH>,
    /// Covering sets found under the current first word.
    found: u64,
    /// False once a skip-to hint below level 1 touched the current first
    /// word, making `found` incomplete.
    reliable: bool,
}

impl<'a, const DEPTH: usize, M: Memo> Search<'a, DEPTH, M> {
    pub fn new(
        problem: &Problem<DEPTH>,
        corpus: &'a Corpus,
        memo: M,
        control: &'a Control,
    ) -> Self {
        let vowels = problem.vowels.filter(|&vowels| {
            let usable = corpus.all_intersect(vowels);
            if !usable {
                log::warn!("some words contain none of {vowels}, tight-bound rule disabled");
            }
            usable
        });

        Self {
            corpus,
            control,
            memo,
            alphabet: problem.alphabet,
            vowels,
            letters_per_word: corpus.max_letters(),
            hints: Hints::default(),
            stack: [0; DEPTH],
            stats: Stats::default(),
            found: 0,
            reliable: true,
        }
    }

    /// Starts the search at the given skip-to positions.
    pub fn with_hints(mut self, hints: Hints<DEPTH>) -> Self {
        self.hints = hints;
        self
    }

    pub fn stats(&self) -> &Stats<DEPTH> {
        &self.stats
    }

    pub fn memo(&self) -> &M {
        &self.memo
    }

    pub fn into_memo(self) -> M {
        self.memo
    }

    /// Runs until the corpus is exhausted or a stop is requested.
    pub fn run<R: Report + ?Sized>(&mut self, report: &mut R) -> Result<Outcome> {
        log::info!(
            "searching {} words for sets of {DEPTH} covering {} letters",
            self.corpus.len(),
            self.alphabet.len()
        );

        let outcome = match self.descend(1, self.alphabet, 1, report)? {
            ControlFlow::Break(()) => Outcome::Stopped,
            ControlFlow::Continue(_) => Outcome::Exhausted,
        };

        log::info!("PRUNE HITS: {}", columns(&self.stats.hits));
        log::info!("COUNTS: {}", columns(&self.stats.iterations));
        Ok(outcome)
    }

    /// Tries every candidate from `start` onward at `level` (1-based), with
    /// `mask` holding the letters still to cover.
    fn descend<R: Report + ?Sized>(
        &mut self,
        level: usize,
        mask: LetterSet,
        start: usize,
        report: &mut R,
    ) -> Result<ControlFlow<(), Subtree>> {
        let corpus = self.corpus;
        let mut subtree = Subtree::EMPTY;

        for index in start..corpus.indices().end {
            self.stats.iterations[level - 1] += 1;
            let word = corpus.word(index);

            if let Some(hint) = self.hints.active(level) {
                // skipped candidates leave this level's results incomplete
                subtree.complete = false;
                if level > 1 {
                    self.reliable = false;
                }
                if word.text.as_str() < hint {
                    continue;
                }
                log::info!("SKIP-TO({level}): {}", word.text);
                self.hints.clear(level);
            }

            self.stack[level - 1] = index;
            if level == 1 {
                self.found = 0;
                self.reliable = true;
            }

            if level == DEPTH && self.control.is_pending() {
                if let ControlFlow::Break(()) = self.checkpoint(report)? {
                    return Ok(ControlFlow::Break(()));
                }
            }

            let visited = self.visit(level, mask, index, report)?;
            let ControlFlow::Continue(below) = visited else {
                return Ok(ControlFlow::Break(()));
            };
            subtree.found |= below.found;
            subtree.complete &= below.complete;

            if level == 1 && self.reliable {
                report.summary(word, self.found)?;
            }
        }

        Ok(ControlFlow::Continue(subtree))
    }

    /// Chooses word `index` at `level` and explores what follows.
    fn visit<R: Report + ?Sized>(
        &mut self,
        level: usize,
        mask_in: LetterSet,
        index: usize,
        report: &mut R,
    ) -> Result<ControlFlow<(), Subtree>> {
        let letters = self.corpus.word(index).letters;

        // a word covering nothing new cannot help
        if !mask_in.intersects(letters) {
            return Ok(ControlFlow::Continue(Subtree::EMPTY));
        }
        let mask = mask_in.without(letters);

        if level == DEPTH {
            if !mask.is_empty() {
                return Ok(ControlFlow::Continue(Subtree::EMPTY));
            }
            self.found += 1;
            report.covering(&self.stack_words())?;
            return Ok(ControlFlow::Continue(Subtree {
                found: true,
                complete: true,
            }));
        }

        if level > 1 {
            if self.memo.lookup(level, mask).prunes(index) {
                self.stats.hits[level - 1] += 1;
                return Ok(ControlFlow::Continue(Subtree::EMPTY));
            }
            if !self.feasible(level, mask) {
                return Ok(ControlFlow::Continue(Subtree::EMPTY));
            }
        }

        let next = self.descend(level + 1, mask, index + 1, report)?;
        let ControlFlow::Continue(below) = next else {
            return Ok(ControlFlow::Break(()));
        };

        if below.found {
            self.memo.record_found(level, mask);
        } else if below.complete {
            self.memo.record_dead_end(level, mask, index);
        }
        Ok(ControlFlow::Continue(below))
    }

    /// Returns false if the slots left after `level` cannot cover `mask`.
    #[inline(always)]
    fn feasible(&self, level: usize, mask: LetterSet) -> bool {
        let slots = (DEPTH - level) as u32;
        let remaining = mask.len();
        let capacity = self.letters_per_word * slots;

        if remaining > capacity {
            return false;
        }
        // zero slack: the remaining words are letter-disjoint and each one
        // brings its own vowel
        if remaining == capacity {
            if let Some(vowels) = self.vowels {
                return mask.intersection(vowels).len() >= slots;
            }
        }
        true
    }

    /// Handles a pending request. Breaks if the search must stop.
    fn checkpoint<R: Report + ?Sized>(&mut self, report: &mut R) -> Result<ControlFlow<()>> {
        let control = self.control;
        match control.take() {
            Some(Request::Stop) => {
                report.last(&self.stack_words())?;
                return Ok(ControlFlow::Break(()));
            }
            Some(Request::Status) => self.dump(),
            Some(Request::Pause) => {
                self.dump();
                log::info!("PAUSED ...");
                if control.wait_for_resume() {
                    report.last(&self.stack_words())?;
                    return Ok(ControlFlow::Break(()));
                }
                log::info!("RESUMING!");
            }
            None => {}
        }
        Ok(ControlFlow::Continue(()))
    }

    fn dump(&mut self) {
        let stack = self
            .stack_words()
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        log::info!("STACK: {stack}");
        log::info!("PRUNE HITS: {}", columns(&self.stats.hits));
        log::info!("COUNTS: {}", columns(&self.stats.iterations));
        let deltas = self.stats.take_deltas();
        log::info!("DELTAS: {}", columns(&deltas));
    }

    fn stack_words(&self) -> Vec<&'a Word> {
        let corpus = self.corpus;
        self.stack.iter().map(|&index| corpus.word(index)).collect()
    }
}
