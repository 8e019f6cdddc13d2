use crate::abelianization::Abelianization;
use crate::error::{AlexanderError, Result};
use crate::laurent::Laurent;
use crate::types::{Letter, Relator};
use num_bigint::BigInt;
use num_traits::Zero;
use std::collections::BTreeMap;

/// Trait for incremental updates over a relator.
/// This allows streaming a word letter by letter.
pub trait IncrementalUpdate {
    /// Updates the state with the next letter of the word.
    fn update(&mut self, letter: Letter);
}

/// Running state of the free derivative with respect to `a`.
///
/// The Leibniz rule `d(uv) = du + u dv` unrolls to a sum over the letters
/// `w_i` of `t^(image of w_0..w_{i-1}) * d(w_i)`, so a left-to-right pass
/// only needs the image of the prefix read so far.
#[derive(Debug, Clone)]
pub struct FoxAccumulator {
    abelianization: Abelianization,
    prefix_exponent: i64,
    terms: BTreeMap<i64, BigInt>,
    letters_read: usize,
}

impl FoxAccumulator {
    pub fn new(abelianization: Abelianization) -> Self {
        FoxAccumulator {
            abelianization,
            prefix_exponent: 0,
            terms: BTreeMap::new(),
            letters_read: 0,
        }
    }

    /// Image of the prefix read so far.
    pub fn prefix_exponent(&self) -> i64 {
        self.prefix_exponent
    }

    pub fn letters_read(&self) -> usize {
        self.letters_read
    }

    /// The raw derivative accumulated so far. Letters with a zero derivative
    /// leave explicit zero entries; nothing is simplified.
    pub fn raw(&self) -> Laurent {
        Laurent::from_terms(self.terms.iter().map(|(&e, c)| (e, c.clone())))
    }

    /// Consumes the accumulator, returning the raw derivative.
    /// Fails if no letter was read.
    pub fn finish(self) -> Result<Laurent> {
        if self.letters_read == 0 {
            return Err(AlexanderError::EmptyRelator);
        }
        Ok(Laurent::from_terms(self.terms))
    }
}

impl IncrementalUpdate for FoxAccumulator {
    fn update(&mut self, letter: Letter) {
        let (exponent, coefficient) = letter_derivative(letter, &self.abelianization);
        let shifted = self.prefix_exponent + exponent;
        *self.terms.entry(shifted).or_insert_with(BigInt::zero) += coefficient;
        log::trace!(
            "fox: letter {} at prefix t^({}) contributes {}t^({})",
            letter,
            self.prefix_exponent,
            coefficient,
            shifted
        );

        self.prefix_exponent += self.abelianization.image(letter);
        self.letters_read += 1;
    }
}

/// Derivative of a single letter with respect to `a`, as one term
/// `(exponent, coefficient)`:
///
/// - `a` -> `{0: 1}`
/// - `b` -> `{0: 0}`
/// - `A` -> `{image(a): -1}`
/// - `B` -> `{0: 0}`
pub fn letter_derivative(letter: Letter, abelianization: &Abelianization) -> (i64, i64) {
    match letter {
        Letter::A => (0, 1),
        Letter::AInverse => (abelianization.image(Letter::A), -1),
        Letter::B | Letter::BInverse => (0, 0),
    }
}

/// Free (Fox) derivative of `relator` with respect to `a`, with every group
/// ring element replaced by its image `t^n` under `abelianization`.
///
/// The result is raw: it may contain zero coefficients.
///
/// # Example
/// ```
/// use alexander_engine::{abelianize, fox_derivative_a, Laurent, Relator};
///
/// let relator: Relator = "aba".parse().unwrap();
/// let raw = fox_derivative_a(&relator, &abelianize(&relator)).unwrap();
/// assert_eq!(raw, Laurent::from_terms([(-1, 1), (0, 1)]));
/// ```
pub fn fox_derivative_a(relator: &Relator, abelianization: &Abelianization) -> Result<Laurent> {
    let mut state = FoxAccumulator::new(*abelianization);
    for &letter in relator.iter() {
        state.update(letter);
    }
    state.finish()
}
