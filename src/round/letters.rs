//! A compact set of the letters `A` through `Z`.

use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const A_ASCII: u32 = 0x41;
const ALL: u32 = (1 << 26) - 1;

/// A set of uppercase ASCII letters.
///
/// Anything that is not one of `A` through `Z` can never be a member, so
/// inserting a space or a digit simply reports that nothing changed.
///
/// # Examples
///
/// ```rust
/// use treeguessr::LetterSet;
///
/// let mut set = LetterSet::from_letters("OAK TREE");
/// assert_eq!(set.len(), 6);
/// assert_eq!(set.to_string(), "AEKORT");
///
/// assert!(set.insert('Z'));
/// assert!(!set.insert('Z'));
/// assert!(!set.insert(' '));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", from = "u32", into = "u32")
)]
pub struct LetterSet {
    bits: u32,
}

fn bit(letter: char) -> Option<u32> {
    letter
        .is_ascii_uppercase()
        .then(|| 1 << (letter as u32 - A_ASCII))
}

impl LetterSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        LetterSet { bits: 0 }
    }

    /// Builds a set from ASCII bytes, skipping anything that is not an
    /// uppercase letter. Usable in constants.
    pub const fn from_ascii(letters: &[u8]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < letters.len() {
            if letters[i].is_ascii_uppercase() {
                bits |= 1 << ((letters[i] - b'A') as u32);
            }
            i += 1;
        }
        LetterSet { bits }
    }

    /// Builds a set from every uppercase letter in `letters`.
    pub fn from_letters(letters: &str) -> Self {
        letters.chars().fold(Self::new(), |mut set, c| {
            set.insert(c);
            set
        })
    }

    pub fn contains(&self, letter: char) -> bool {
        bit(letter).map_or(false, |b| self.bits & b != 0)
    }

    /// Adds a letter, returning `true` if it was not already present.
    pub fn insert(&mut self, letter: char) -> bool {
        match bit(letter) {
            Some(b) if self.bits & b == 0 => {
                self.bits |= b;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterates over the members in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        ('A'..='Z').filter(move |&c| self.contains(c))
    }

    pub fn union(self, other: LetterSet) -> LetterSet {
        LetterSet {
            bits: self.bits | other.bits,
        }
    }

    /// Letters in `self` that are not in `other`.
    pub fn difference(self, other: LetterSet) -> LetterSet {
        LetterSet {
            bits: self.bits & !other.bits,
        }
    }

    pub fn intersection(self, other: LetterSet) -> LetterSet {
        LetterSet {
            bits: self.bits & other.bits,
        }
    }

    /// Returns true if every letter of `other` is also in `self`.
    pub fn is_superset(&self, other: LetterSet) -> bool {
        other.bits & !self.bits == 0
    }
}

impl From<u32> for LetterSet {
    fn from(bits: u32) -> Self {
        LetterSet { bits: bits & ALL }
    }
}

impl From<LetterSet> for u32 {
    fn from(set: LetterSet) -> Self {
        set.bits
    }
}

impl FromIterator<char> for LetterSet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        iter.into_iter().fold(Self::new(), |mut set, c| {
            set.insert(c);
            set
        })
    }
}

impl Display for LetterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.iter() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ignores_non_letters() {
        let mut set = LetterSet::new();
        assert!(!set.insert(' '));
        assert!(!set.insert('a'));
        assert!(!set.insert('7'));
        assert!(!set.insert('É'));
        assert!(set.is_empty());
        assert!(!set.contains(' '));
    }

    #[test]
    fn const_and_runtime_construction_agree() {
        const VOWELS: LetterSet = LetterSet::from_ascii(b"AEIOU");
        assert_eq!(VOWELS, LetterSet::from_letters("UOIEA"));
        assert_eq!(VOWELS, "A E I O U".chars().collect());
    }

    #[test]
    fn set_operations() {
        let secret = LetterSet::from_letters("SILVER BIRCH");
        let guessed = LetterSet::from_letters("SIZQ");

        assert_eq!(guessed.intersection(secret).to_string(), "IS");
        assert_eq!(guessed.difference(secret).to_string(), "QZ");
        assert!(!guessed.is_superset(secret));
        assert!(guessed.union(secret).is_superset(secret));
        assert!(secret.is_superset(LetterSet::new()));
    }

    #[test]
    fn raw_bits_are_masked() {
        let set = LetterSet::from(u32::MAX);
        assert_eq!(set.len(), 26);
        assert_eq!(u32::from(set), ALL);
    }
}
