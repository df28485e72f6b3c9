//! Where search results go.
//!
//! Text output, one line per event:
//! - a covering set: its words in corpus order, space separated
//! - a first-word summary: `# WORD = COUNT`
//! - the position at a requested stop: `LAST: ` followed by the stack

use std::io::{self, Write};

use crate::corpus::Word;

/// Receives the results of a search.
pub trait Report {
    /// A covering set, in corpus order.
    fn covering(&mut self, words: &[&Word]) -> io::Result<()>;

    /// The number of covering sets whose first word is `first`.
    fn summary(&mut self, first: &Word, count: u64) -> io::Result<()>;

    /// The stack at the moment the search was stopped.
    fn last(&mut self, stack: &[&Word]) -> io::Result<()>;
}

/// Writes results as text lines, flushing after every line so that
/// readers of the output see each result as soon as it is found.
pub struct TextReport<W: Write> {
    out: W,
    expand_variants: bool,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            expand_variants: false,
        }
    }

    /// Prints every word as `[WORD|VARIANT...]` when it has variants.
    pub fn expand_variants(mut self, expand: bool) -> Self {
        self.expand_variants = expand;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn text(&self, word: &Word) -> String {
        if self.expand_variants {
            word.with_variants()
        } else {
            word.text.clone()
        }
    }

    fn join(&self, words: &[&Word]) -> String {
        words
            .iter()
            .map(|w| self.text(w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<W: Write> Report for TextReport<W> {
    fn covering(&mut self, words: &[&Word]) -> io::Result<()> {
        let line = self.join(words);
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    fn summary(&mut self, first: &Word, count: u64) -> io::Result<()> {
        let word = self.text(first);
        writeln!(self.out, "# {word} = {count}")?;
        self.out.flush()
    }

    fn last(&mut self, stack: &[&Word]) -> io::Result<()> {
        let line = self.join(stack);
        writeln!(self.out, "LAST: {line}")?;
        self.out.flush()
    }
}

/// Keeps results in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Collect {
    pub coverings: Vec<Vec<String>>,
    pub summaries: Vec<(String, u64)>,
    pub last: Option<Vec<String>>,
}

fn texts(words: &[&Word]) -> Vec<String> {
    words.iter().map(|w| w.text.clone()).collect()
}

impl Report for Collect {
    fn covering(&mut self, words: &[&Word]) -> io::Result<()> {
        self.coverings.push(texts(words));
        Ok(())
    }

    fn summary(&mut self, first: &Word, count: u64) -> io::Result<()> {
        self.summaries.push((first.text.clone(), count));
        Ok(())
    }

    fn last(&mut self, stack: &[&Word]) -> io::Result<()> {
        self.last = Some(texts(stack));
        Ok(())
    }
}
