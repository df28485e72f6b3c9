//! The prune cache: a flat table keyed by (level, remaining letters).
//!
//! Each entry is a `u16`:
//! - `NO_INFO` until the state is first finished,
//! - `COVERING_FOUND` once some covering set was found below the state,
//! - otherwise the corpus index of the word chosen at that level when the
//!   state was proven a dead end.
//!
//! A dead end recorded for word index `i` covers every later arrival with a
//! word index `>= i`: the later subtree starts further along the corpus, so
//! its candidates are a subset of the ones already exhausted.

use crate::error::{Error, Result};
use crate::letters::LetterSet;

const NO_INFO: u16 = 0xFFFF;
const COVERING_FOUND: u16 = 0xFFFE;

/// What the cache knows about a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    NoInfo,
    CoveringFound,
    /// No covering set below this state for any chosen word index at or
    /// above this one.
    DeadEnd(u16),
}

impl Entry {
    /// Returns true if the entry proves that arriving here with word
    /// `index` leads nowhere.
    #[inline(always)]
    pub fn prunes(self, index: usize) -> bool {
        matches!(self, Entry::DeadEnd(dead) if dead as usize <= index)
    }
}

/// Storage for dead-end and success marks, so the search can run with or
/// without memoization.
pub trait Memo {
    fn lookup(&self, level: usize, mask: LetterSet) -> Entry;
    fn record_dead_end(&mut self, level: usize, mask: LetterSet, index: usize);
    fn record_found(&mut self, level: usize, mask: LetterSet);
}

/// Prune cache backed by one `u16` per (level, mask) pair.
pub struct PruneCache {
    entries: Vec<u16>,
    width: u32,
}

impl PruneCache {
    /// Allocates a table for `levels` levels over masks of `width` bits.
    ///
    /// Fails instead of aborting when the memory is not available.
    pub fn new(levels: usize, width: u32) -> Result<Self> {
        let len = levels << width;
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(len)
            .map_err(|_| Error::CacheAllocation { entries: len })?;
        entries.resize(len, NO_INFO);
        Ok(Self { entries, width })
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    fn key(&self, level: usize, mask: LetterSet) -> usize {
        debug_assert!(level >= 1);
        ((level - 1) << self.width) | mask.bits() as usize
    }
}

impl Memo for PruneCache {
    #[inline(always)]
    fn lookup(&self, level: usize, mask: LetterSet) -> Entry {
        match self.entries[self.key(level, mask)] {
            NO_INFO => Entry::NoInfo,
            COVERING_FOUND => Entry::CoveringFound,
            index => Entry::DeadEnd(index),
        }
    }

    fn record_dead_end(&mut self, level: usize, mask: LetterSet, index: usize) {
        debug_assert!(index < COVERING_FOUND as usize);
        let key = self.key(level, mask);
        let slot = &mut self.entries[key];
        // found marks are final; dead ends only tighten
        // (NO_INFO is the largest value, so it is always replaced)
        if *slot != COVERING_FOUND && (index as u16) < *slot {
            *slot = index as u16;
        }
    }

    fn record_found(&mut self, level: usize, mask: LetterSet) {
        let key = self.key(level, mask);
        self.entries[key] = COVERING_FOUND;
    }
}

/// A memo that never remembers anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMemo;

impl Memo for NoMemo {
    #[inline(always)]
    fn lookup(&self, _level: usize, _mask: LetterSet) -> Entry {
        Entry::NoInfo
    }

    fn record_dead_end(&mut self, _level: usize, _mask: LetterSet, _index: usize) {}

    fn record_found(&mut self, _level: usize, _mask: LetterSet) {}
}
