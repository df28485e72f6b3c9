//! Covering-Set Search Library
//!
//! Finds every set of words, taken from a fixed corpus, whose letters
//! together cover a whole alphabet: the classic six five-letter words using
//! all 26 letters.

pub mod cache;
pub mod check;
pub mod control;
pub mod corpus;
pub mod error;
pub mod letters;
pub mod problem;
pub mod report;
pub mod search;

pub use error::{Error, Result};

use cache::Memo;
use report::Report;
use search::{Outcome, Search};

/// Trait that erases the compile-time depth and the memo type for dynamic
/// dispatch, so callers can pick a cached or uncached search at run time.
pub trait SearchOps {
    fn run(&mut self, report: &mut dyn Report) -> Result<Outcome>;
}

impl<const DEPTH: usize, M: Memo> SearchOps for Search<'_, DEPTH, M> {
    fn run(&mut self, report: &mut dyn Report) -> Result<Outcome> {
        Search::run(self, report)
    }
}
