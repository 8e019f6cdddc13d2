use crate::error::{AlexanderError, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A Laurent polynomial over the integers.
///
/// Stored sparsely as exponent -> coefficient. Operations return simplified
/// polynomials (no zero coefficients); only [`Laurent::from_terms`] and
/// [`Laurent::monomial`] can build an unsimplified value, which is how the Fox
/// derivative represents its explicit `{0: 0}` base case.
///
/// Equality compares the simplified terms, so `{0: 0}` equals the zero
/// polynomial.
#[derive(Debug, Clone, Default)]
pub struct Laurent {
    terms: BTreeMap<i64, BigInt>,
}

impl Laurent {
    /// The zero polynomial (empty mapping).
    pub fn zero() -> Self {
        Laurent {
            terms: BTreeMap::new(),
        }
    }

    /// The multiplicative identity `{0: 1}`.
    pub fn one() -> Self {
        Self::monomial(0, 1)
    }

    /// The single term `coefficient * t^exponent`. A zero coefficient is kept.
    pub fn monomial(exponent: i64, coefficient: impl Into<BigInt>) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(exponent, coefficient.into());
        Laurent { terms }
    }

    /// Builds a polynomial from `(exponent, coefficient)` pairs.
    ///
    /// Repeated exponents are summed. Zero coefficients are kept until
    /// [`Laurent::simplify`] is called.
    pub fn from_terms<I, C>(terms: I) -> Self
    where
        I: IntoIterator<Item = (i64, C)>,
        C: Into<BigInt>,
    {
        let mut map = BTreeMap::new();
        for (exponent, coefficient) in terms {
            let coefficient: BigInt = coefficient.into();
            *map.entry(exponent).or_insert_with(BigInt::zero) += coefficient;
        }
        Laurent { terms: map }
    }

    /// Returns true if every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.terms.values().all(Zero::is_zero)
    }

    /// Number of non-zero terms.
    pub fn len(&self) -> usize {
        self.terms().count()
    }

    /// Returns true if there are no non-zero terms.
    pub fn is_empty(&self) -> bool {
        self.is_zero()
    }

    /// Returns true if no stored entry has a zero coefficient.
    pub fn is_simplified(&self) -> bool {
        !self.terms.values().any(Zero::is_zero)
    }

    /// Coefficient of `t^exponent` (zero when absent).
    pub fn coefficient(&self, exponent: i64) -> BigInt {
        self.terms.get(&exponent).cloned().unwrap_or_else(BigInt::zero)
    }

    /// Non-zero terms in ascending exponent order.
    pub fn terms(&self) -> impl Iterator<Item = (i64, &BigInt)> + '_ {
        self.terms
            .iter()
            .filter(|(_, c)| !c.is_zero())
            .map(|(&e, c)| (e, c))
    }

    pub fn min_exponent(&self) -> Option<i64> {
        self.terms().next().map(|(e, _)| e)
    }

    pub fn max_exponent(&self) -> Option<i64> {
        self.leading_term().map(|(e, _)| e)
    }

    /// The highest-exponent non-zero term.
    pub fn leading_term(&self) -> Option<(i64, &BigInt)> {
        self.terms
            .iter()
            .rev()
            .find(|(_, c)| !c.is_zero())
            .map(|(&e, c)| (e, c))
    }

    /// `(min, max)` exponents of the non-zero terms.
    fn support(&self) -> Option<(i64, i64)> {
        Some((self.min_exponent()?, self.max_exponent()?))
    }

    /// Removes every zero-coefficient entry. Idempotent.
    pub fn simplify(&self) -> Laurent {
        self.clone().into_simplified()
    }

    fn into_simplified(mut self) -> Laurent {
        self.terms.retain(|_, c| !c.is_zero());
        self
    }

    /// Multiplies by `t^k`.
    pub fn shift(&self, k: i64) -> Laurent {
        let terms = self
            .terms()
            .map(|(e, c)| (e + k, c.clone()))
            .collect::<BTreeMap<_, _>>();
        Laurent { terms }
    }

    /// Multiplies every coefficient by `factor`.
    pub fn scale(&self, factor: &BigInt) -> Laurent {
        let terms = self
            .terms()
            .map(|(e, c)| (e, c * factor))
            .collect::<BTreeMap<_, _>>();
        Laurent { terms }.into_simplified()
    }

    /// Convolution product. Cost is `O(|self| * |other|)`.
    pub fn multiply(&self, other: &Laurent) -> Laurent {
        let mut terms = BTreeMap::new();
        for (e1, c1) in &self.terms {
            for (e2, c2) in &other.terms {
                *terms.entry(e1 + e2).or_insert_with(BigInt::zero) += c1 * c2;
            }
        }
        Laurent { terms }.into_simplified()
    }

    /// Shifts the polynomial so its lowest exponent becomes 0, producing an
    /// honest polynomial in `Z[t]`.
    pub fn positive_normalize(&self) -> Result<Laurent> {
        let min = self.min_exponent().ok_or(AlexanderError::EmptyPolynomial {
            operation: "positive_normalize",
        })?;
        Ok(self.shift(-min))
    }

    /// Recentres the support about 0 by multiplying with `t^-floor((max + min) / 2)`.
    ///
    /// Coefficient symmetry is not checked; see [`Laurent::is_palindromic`].
    pub fn symmetrize(&self) -> Result<Laurent> {
        let (min, max) = self.support().ok_or(AlexanderError::EmptyPolynomial {
            operation: "symmetrize",
        })?;
        let centre = Integer::div_floor(&(max + min), &2);
        Ok(self.shift(-centre))
    }

    /// Exact quotient `self / divisor` by leading-term elimination.
    ///
    /// Each step cancels the remainder's highest term against the divisor's
    /// highest term. Fails with [`AlexanderError::InexactDivision`] as soon as
    /// a leading coefficient ratio is not an integer or the non-zero remainder
    /// becomes narrower than the divisor.
    pub fn divide(&self, divisor: &Laurent) -> Result<Laurent> {
        let divisor = divisor.simplify();
        let (d_min, d_max) = divisor.support().ok_or(AlexanderError::DivisionByZero)?;
        let d_lead = divisor.coefficient(d_max);

        let mut remainder = self.simplify();
        let mut quotient = BTreeMap::new();

        while let Some((r_min, r_max)) = remainder.support() {
            if r_max - r_min < d_max - d_min {
                return Err(AlexanderError::InexactDivision {
                    reason: format!("non-zero remainder {} left by divisor {}", remainder, divisor),
                });
            }

            let k = r_max - d_max;
            let r_lead = remainder.coefficient(r_max);
            let (ratio, rest) = Integer::div_rem(&r_lead, &d_lead);
            if !rest.is_zero() {
                return Err(AlexanderError::InexactDivision {
                    reason: format!("leading coefficient {} is not a multiple of {}", r_lead, d_lead),
                });
            }

            log::trace!("divide: quotient term {}t^({})", ratio, k);
            remainder = &remainder - &divisor.shift(k).scale(&ratio);
            quotient.insert(k, ratio);
        }

        Ok(Laurent { terms: quotient })
    }

    /// Value at `t = 1`, i.e. the sum of all coefficients.
    pub fn evaluate_at_one(&self) -> BigInt {
        self.terms.values().sum()
    }

    /// Returns true if the coefficients read the same from both ends of the
    /// support. The zero polynomial is palindromic.
    pub fn is_palindromic(&self) -> bool {
        match self.support() {
            Some((min, max)) => self
                .terms()
                .all(|(e, c)| self.coefficient(min + max - e) == *c),
            None => true,
        }
    }
}

/// Returns `1 + t + ... + t^(n-1)`.
pub fn all_ones(n: u64) -> Laurent {
    Laurent::from_terms((0..n).map(|e| (e as i64, 1)))
}

/// Renders `c1t^(e1) + c2t^(e2) + ...` in ascending exponent order.
///
/// The zero polynomial renders as `0`.
pub fn laurent_to_string(poly: &Laurent) -> String {
    let rendered = poly
        .terms()
        .map(|(e, c)| format!("{}t^({})", c, e))
        .collect::<Vec<_>>();
    if rendered.is_empty() {
        "0".to_string()
    } else {
        rendered.join(" + ")
    }
}

impl fmt::Display for Laurent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&laurent_to_string(self))
    }
}

impl PartialEq for Laurent {
    fn eq(&self, other: &Self) -> bool {
        self.terms().eq(other.terms())
    }
}

impl Eq for Laurent {}

impl Serialize for Laurent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (exponent, coefficient) in self.terms() {
            map.serialize_entry(&exponent, &coefficient.to_string())?;
        }
        map.end()
    }
}

impl Add<&Laurent> for &Laurent {
    type Output = Laurent;

    fn add(self, rhs: &Laurent) -> Laurent {
        let mut terms = self.terms.clone();
        for (e, c) in &rhs.terms {
            *terms.entry(*e).or_insert_with(BigInt::zero) += c;
        }
        Laurent { terms }.into_simplified()
    }
}

impl Add for Laurent {
    type Output = Laurent;

    fn add(self, rhs: Laurent) -> Laurent {
        &self + &rhs
    }
}

impl Neg for &Laurent {
    type Output = Laurent;

    fn neg(self) -> Laurent {
        let terms = self
            .terms()
            .map(|(e, c)| (e, -c))
            .collect::<BTreeMap<_, _>>();
        Laurent { terms }
    }
}

impl Neg for Laurent {
    type Output = Laurent;

    fn neg(self) -> Laurent {
        -&self
    }
}

impl Sub<&Laurent> for &Laurent {
    type Output = Laurent;

    fn sub(self, rhs: &Laurent) -> Laurent {
        self + &(-rhs)
    }
}

impl Sub for Laurent {
    type Output = Laurent;

    fn sub(self, rhs: Laurent) -> Laurent {
        &self - &rhs
    }
}

impl Mul<&Laurent> for &Laurent {
    type Output = Laurent;

    fn mul(self, rhs: &Laurent) -> Laurent {
        self.multiply(rhs)
    }
}

impl Mul for Laurent {
    type Output = Laurent;

    fn mul(self, rhs: Laurent) -> Laurent {
        self.multiply(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn poly(terms: &[(i64, i64)]) -> Laurent {
        Laurent::from_terms(terms.iter().copied())
    }

    #[test]
    fn test_add_cancels_terms() {
        let sum = &poly(&[(1, 1), (2, -1)]) + &poly(&[(2, 1), (3, 1)]);
        assert_eq!(sum, poly(&[(1, 1), (3, 1)]));
        assert_eq!(sum.coefficient(2), BigInt::zero());
        assert!(sum.is_simplified());
        assert_eq!(sum.len(), 2);
    }

    #[test]
    fn test_add_identity() {
        let p = poly(&[(-2, 3), (5, -1)]);
        assert_eq!(&p + &Laurent::zero(), p);
    }

    #[test]
    fn test_multiply() {
        // (1 + t)(1 - t) = 1 - t^2
        let product = poly(&[(0, 1), (1, 1)]).multiply(&poly(&[(0, 1), (1, -1)]));
        assert_eq!(product, poly(&[(0, 1), (2, -1)]));
        assert!(product.is_simplified());
    }

    #[test]
    fn test_multiply_with_negative_exponents() {
        // (t^-1 + t)^2 = t^-2 + 2 + t^2
        let p = poly(&[(-1, 1), (1, 1)]);
        assert_eq!(&p * &p, poly(&[(-2, 1), (0, 2), (2, 1)]));
    }

    #[test]
    fn test_multiply_by_zero() {
        let p = poly(&[(0, 4), (3, 2)]);
        assert!(p.multiply(&Laurent::zero()).is_zero());
    }

    #[test]
    fn test_simplify_removes_zeros() {
        let raw = poly(&[(0, 0), (1, 2), (4, 0)]);
        assert!(!raw.is_simplified());
        let simplified = raw.simplify();
        assert!(simplified.is_simplified());
        assert_eq!(simplified.len(), 1);
        assert_eq!(simplified.simplify(), simplified);
    }

    #[test]
    fn test_zero_entry_equals_zero_polynomial() {
        assert_eq!(Laurent::monomial(0, 0), Laurent::zero());
        assert!(Laurent::monomial(0, 0).is_zero());
    }

    #[test]
    fn test_positive_normalize() {
        let p = poly(&[(-3, 1), (-1, 2), (2, 5)]);
        assert_eq!(
            p.positive_normalize().unwrap(),
            poly(&[(0, 1), (2, 2), (5, 5)])
        );
    }

    #[test]
    fn test_positive_normalize_zero_fails() {
        assert_eq!(
            Laurent::zero().positive_normalize(),
            Err(AlexanderError::EmptyPolynomial {
                operation: "positive_normalize"
            })
        );
        assert!(Laurent::monomial(0, 0).positive_normalize().is_err());
    }

    #[test]
    fn test_symmetrize() {
        // 1 - t + t^2 -> t^-1 - 1 + t
        let p = poly(&[(0, 1), (1, -1), (2, 1)]);
        let sym = p.symmetrize().unwrap();
        assert_eq!(sym, poly(&[(-1, 1), (0, -1), (1, 1)]));
        assert_eq!(sym.symmetrize().unwrap(), sym);
    }

    #[test]
    fn test_symmetrize_floors_odd_span() {
        // support [-4, -1]: floor(-5 / 2) = -3
        let p = poly(&[(-4, 1), (-1, 1)]);
        assert_eq!(p.symmetrize().unwrap(), poly(&[(-1, 1), (2, 1)]));
    }

    #[test]
    fn test_symmetrize_zero_fails() {
        assert!(matches!(
            Laurent::zero().symmetrize(),
            Err(AlexanderError::EmptyPolynomial { .. })
        ));
    }

    #[test]
    fn test_all_ones() {
        assert_eq!(all_ones(3), poly(&[(0, 1), (1, 1), (2, 1)]));
        assert_eq!(all_ones(1), Laurent::one());
    }

    #[test]
    fn test_divide_by_itself() {
        let p = all_ones(3);
        assert_eq!(p.divide(&p).unwrap(), Laurent::one());
    }

    #[test]
    fn test_divide_exact() {
        // (t^2 - t + 1)(1 + t + ... + t^6)
        let quotient = poly(&[(0, 1), (1, -1), (2, 1)]);
        let product = quotient.multiply(&all_ones(7));
        assert_eq!(product.divide(&all_ones(7)).unwrap(), quotient);
    }

    #[test]
    fn test_divide_non_unit_leading_coefficients() {
        let divisor = poly(&[(0, 2), (1, 3)]);
        let quotient = poly(&[(-2, -5), (0, 7)]);
        let product = quotient.multiply(&divisor);
        assert_eq!(product.divide(&divisor).unwrap(), quotient);
    }

    #[test]
    fn test_divide_inexact_coefficient() {
        let result = poly(&[(0, 1), (1, 3)]).divide(&poly(&[(0, 1), (1, 2)]));
        assert!(matches!(result, Err(AlexanderError::InexactDivision { .. })));
    }

    #[test]
    fn test_divide_inexact_remainder() {
        // 1 + 2t^2 + t^4 is not a multiple of 1 + t + t^2 + t^3
        let result = poly(&[(0, 1), (2, 2), (4, 1)]).divide(&all_ones(4));
        assert!(matches!(result, Err(AlexanderError::InexactDivision { .. })));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            all_ones(2).divide(&Laurent::monomial(3, 0)),
            Err(AlexanderError::DivisionByZero)
        );
    }

    #[test]
    fn test_divide_zero_dividend() {
        assert!(Laurent::zero().divide(&all_ones(3)).unwrap().is_zero());
    }

    #[test]
    fn test_evaluate_at_one() {
        assert_eq!(poly(&[(-1, 1), (0, -1), (1, 1)]).evaluate_at_one(), BigInt::one());
        assert_eq!(all_ones(5).evaluate_at_one(), BigInt::from(5));
    }

    #[test]
    fn test_is_palindromic() {
        assert!(poly(&[(-1, 1), (0, -1), (1, 1)]).is_palindromic());
        assert!(!poly(&[(0, 1), (1, 2)]).is_palindromic());
        assert!(Laurent::zero().is_palindromic());
    }

    #[test]
    fn test_laurent_to_string() {
        let p = poly(&[(1, 2), (-1, 1), (0, -3)]);
        assert_eq!(laurent_to_string(&p), "1t^(-1) + -3t^(0) + 2t^(1)");
        assert_eq!(Laurent::zero().to_string(), "0");
    }

    #[test]
    fn test_big_coefficients() {
        let big = BigInt::from(i64::MAX) * BigInt::from(4);
        let p = Laurent::monomial(2, big.clone());
        let squared = p.multiply(&p);
        assert_eq!(squared.coefficient(4), &big * &big);
        assert_eq!(squared.divide(&p).unwrap(), p);
    }

    #[test]
    fn test_serialize_as_map() {
        let json = serde_json::to_string(&poly(&[(-1, 1), (0, -1), (1, 1)])).unwrap();
        assert_eq!(json, r#"{"-1":"1","0":"-1","1":"1"}"#);
    }
}
