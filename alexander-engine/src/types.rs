use crate::error::{AlexanderError, Result};
use crate::knot::{HeddenKnot, Knot, SimpleKnot};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A letter of a relator word over the free group on `a` and `b`.
/// Uppercase letters are the formal inverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    A,
    B,
    AInverse,
    BInverse,
}

impl Letter {
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::AInverse, Letter::BInverse];

    /// Returns the character used in relator strings.
    pub fn as_char(self) -> char {
        match self {
            Letter::A => 'a',
            Letter::B => 'b',
            Letter::AInverse => 'A',
            Letter::BInverse => 'B',
        }
    }

    /// Returns true for `A` and `B`.
    pub fn is_inverse(self) -> bool {
        matches!(self, Letter::AInverse | Letter::BInverse)
    }

    pub fn inverse(self) -> Letter {
        match self {
            Letter::A => Letter::AInverse,
            Letter::B => Letter::BInverse,
            Letter::AInverse => Letter::A,
            Letter::BInverse => Letter::B,
        }
    }
}

impl TryFrom<char> for Letter {
    type Error = AlexanderError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'a' => Ok(Letter::A),
            'b' => Ok(Letter::B),
            'A' => Ok(Letter::AInverse),
            'B' => Ok(Letter::BInverse),
            other => Err(AlexanderError::InvalidLetter(other)),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A relator: a word over {a, b, A, B}.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Relator {
    letters: Vec<Letter>,
}

impl Relator {
    /// Creates an empty word.
    pub fn new() -> Self {
        Relator {
            letters: Vec::new(),
        }
    }

    pub fn from_letters(letters: Vec<Letter>) -> Self {
        Relator { letters }
    }

    /// Appends a letter.
    pub fn push(&mut self, letter: Letter) {
        self.letters.push(letter);
    }

    /// Appends every letter of `letters`.
    pub fn extend_from_slice(&mut self, letters: &[Letter]) {
        self.letters.extend_from_slice(letters);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Letter> {
        self.letters.iter()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Number of occurrences of `letter`.
    pub fn count(&self, letter: Letter) -> usize {
        self.letters.iter().filter(|&&l| l == letter).count()
    }
}

impl From<Vec<Letter>> for Relator {
    fn from(letters: Vec<Letter>) -> Self {
        Relator::from_letters(letters)
    }
}

impl FromStr for Relator {
    type Err = AlexanderError;

    fn from_str(word: &str) -> Result<Self> {
        word.chars()
            .map(Letter::try_from)
            .collect::<Result<Vec<_>>>()
            .map(Relator::from_letters)
    }
}

impl fmt::Display for Relator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.letters {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

impl Serialize for Relator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The two families of (1,1)-knots handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KnotFamily {
    Simple,
    Hedden,
}

impl fmt::Display for KnotFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnotFamily::Simple => f.write_str("simple"),
            KnotFamily::Hedden => f.write_str("hedden"),
        }
    }
}

/// Parameters identifying one knot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum KnotSpec {
    /// Simple knot in L(p,q) representing the class k in Z/pZ.
    Simple { p: u64, q: u64, k: u64 },
    /// Hedden knot in L(p,q).
    Hedden { p: u64, q: u64 },
}

impl KnotSpec {
    pub fn family(&self) -> KnotFamily {
        match self {
            KnotSpec::Simple { .. } => KnotFamily::Simple,
            KnotSpec::Hedden { .. } => KnotFamily::Hedden,
        }
    }

    pub fn p(&self) -> u64 {
        match *self {
            KnotSpec::Simple { p, .. } | KnotSpec::Hedden { p, .. } => p,
        }
    }

    pub fn q(&self) -> u64 {
        match *self {
            KnotSpec::Simple { q, .. } | KnotSpec::Hedden { q, .. } => q,
        }
    }

    /// The homology class; Hedden knots fix it at `q + 1`.
    pub fn k(&self) -> u64 {
        match *self {
            KnotSpec::Simple { k, .. } => k,
            KnotSpec::Hedden { q, .. } => q + 1,
        }
    }

    /// Computes the knot without validating the parameters.
    pub fn build(&self) -> Result<Knot> {
        match *self {
            KnotSpec::Simple { p, q, k } => SimpleKnot::new(p, q, k).map(Knot::Simple),
            KnotSpec::Hedden { p, q } => HeddenKnot::new(p, q).map(Knot::Hedden),
        }
    }

    /// Computes the knot after validating the parameters.
    pub fn build_checked(&self) -> Result<Knot> {
        match *self {
            KnotSpec::Simple { p, q, k } => SimpleKnot::checked(p, q, k).map(Knot::Simple),
            KnotSpec::Hedden { p, q } => HeddenKnot::checked(p, q).map(Knot::Hedden),
        }
    }
}

impl fmt::Display for KnotSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnotSpec::Simple { p, q, k } => write!(f, "simple({},{},{})", p, q, k),
            KnotSpec::Hedden { p, q } => write!(f, "hedden({},{})", p, q),
        }
    }
}
