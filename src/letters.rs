//! Letter-set bitmasks.
//!
//! Bit `i` stands for the letter `'A' + i`, so the whole 26-letter alphabet
//! fits in the low 26 bits of a `u32`.

use std::fmt;
use std::str::FromStr;

/// A set of uppercase ASCII letters stored as a bitmask.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LetterSet(u32);

/// All 26 letters A-Z.
pub const ALPHABET: LetterSet = LetterSet((1 << 26) - 1);

/// Letters every five-letter word in the production word list contains at
/// least one of.
pub const VOWELS: LetterSet = LetterSet::from_letters(b"AEIOUYW");

impl LetterSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Builds a set from raw bits.
    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & ALPHABET.0)
    }

    /// Builds a set from uppercase ASCII letters, ignoring anything else.
    pub const fn from_letters(letters: &[u8]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < letters.len() {
            let c = letters[i];
            if c.is_ascii_uppercase() {
                bits |= 1 << (c - b'A');
            }
            i += 1;
        }
        Self(bits)
    }

    /// Returns the letters of `word`, or `None` if it holds a non-letter.
    ///
    /// Case is ignored.
    pub fn from_word(word: &str) -> Option<Self> {
        let mut bits = 0u32;
        for c in word.bytes() {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            bits |= 1 << (c.to_ascii_uppercase() - b'A');
        }
        Some(Self(bits))
    }

    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Number of letters in the set.
    #[inline(always)]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of bits needed to hold any subset of this set.
    pub const fn width(self) -> u32 {
        u32::BITS - self.0.leading_zeros()
    }

    #[inline(always)]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline(always)]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline(always)]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Letters of `self` not in `other`.
    #[inline(always)]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn contains_all(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Iterates the letters in alphabetical order.
    pub fn letters(self) -> impl Iterator<Item = char> {
        let mut remaining = self.0;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let bit = remaining.trailing_zeros();
            remaining &= remaining - 1;
            Some(char::from(b'A' + bit as u8))
        })
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.letters() {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LetterSet({self})")
    }
}

/// Error returned when parsing a [`LetterSet`] from text with non-letters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a set of letters: {0:?}")]
pub struct ParseLetterSetError(String);

impl FromStr for LetterSet {
    type Err = ParseLetterSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_word(s).ok_or_else(|| ParseLetterSetError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_word_collapses_repeats() {
        let set = LetterSet::from_word("eerie").unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "EIR");
    }

    #[test]
    fn test_from_word_rejects_non_letters() {
        assert_eq!(LetterSet::from_word("ab-cd"), None);
        assert_eq!(LetterSet::from_word("abc1"), None);
    }

    #[test]
    fn test_alphabet_and_vowels() {
        assert_eq!(ALPHABET.len(), 26);
        assert_eq!(ALPHABET.width(), 26);
        assert_eq!(VOWELS.to_string(), "AEIOUWY");
        assert!(ALPHABET.contains_all(VOWELS));
    }

    #[test]
    fn test_without_clears_letters() {
        let remaining = ALPHABET.without(LetterSet::from_word("FJORD").unwrap());
        assert_eq!(remaining.len(), 21);
        assert!(!remaining.intersects(LetterSet::from_word("DJ").unwrap()));
    }

    #[test]
    fn test_width_of_reduced_alphabet() {
        let abc: LetterSet = "ABC".parse().unwrap();
        assert_eq!(abc.width(), 3);
        assert_eq!(LetterSet::EMPTY.width(), 0);
        assert_eq!(LetterSet::from_letters(b"AD").width(), 4);
    }
}
