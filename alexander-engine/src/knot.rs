use crate::abelianization::{abelianize, Abelianization};
use crate::error::{AlexanderError, Result};
use crate::fox::fox_derivative_a;
use crate::laurent::Laurent;
use crate::normalization::{normalize, normalize_with_trace, NormalizationPath, NormalizationTrace};
use crate::relator::{hedden_relator, simple_relator};
use crate::types::{KnotFamily, KnotSpec, Relator};
use num_integer::Integer;
use serde::Serialize;

/// Shared read access to a computed knot.
pub trait AlexanderInvariant {
    fn spec(&self) -> KnotSpec;

    fn relator(&self) -> &Relator;

    fn abelianization(&self) -> &Abelianization;

    /// Fox derivative before normalization (may hold zero entries).
    fn raw_fox_derivative(&self) -> &Laurent;

    /// The normalized, recentred Alexander polynomial.
    fn alexander_polynomial(&self) -> &Laurent;

    fn family(&self) -> KnotFamily {
        self.spec().family()
    }

    fn normalization_path(&self) -> NormalizationPath {
        match self.spec() {
            KnotSpec::Simple { p, .. } => NormalizationPath::Simple { p },
            KnotSpec::Hedden { .. } => NormalizationPath::Hedden,
        }
    }

    /// Recomputes the normalization keeping every intermediate step.
    fn normalization_trace(&self) -> Result<NormalizationTrace> {
        normalize_with_trace(self.raw_fox_derivative(), self.normalization_path())
    }
}

/// Output of relator -> abelianization -> Fox derivative -> normalization.
#[derive(Debug, Clone, PartialEq)]
struct Computed {
    relator: Relator,
    abelianization: Abelianization,
    raw_fox_derivative: Laurent,
    alexander_polynomial: Laurent,
}

impl Computed {
    fn run(relator: Relator, path: NormalizationPath) -> Result<Self> {
        let abelianization = abelianize(&relator);
        let raw_fox_derivative = fox_derivative_a(&relator, &abelianization)?;
        let alexander_polynomial = normalize(&raw_fox_derivative, path)?;
        Ok(Computed {
            relator,
            abelianization,
            raw_fox_derivative,
            alexander_polynomial,
        })
    }
}

/// The simple knot in L(p,q) representing the homology class k.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleKnot {
    p: u64,
    q: u64,
    k: u64,
    computed: Computed,
}

impl SimpleKnot {
    /// Computes the knot without validating the parameters.
    ///
    /// Invalid parameters produce a meaningless polynomial or an error from
    /// the pipeline (for example [`AlexanderError::InexactDivision`] when
    /// `gcd(p, k) > 1`).
    pub fn new(p: u64, q: u64, k: u64) -> Result<Self> {
        let computed = Computed::run(simple_relator(p, q, k), NormalizationPath::Simple { p })?;
        log::debug!(
            "simple({},{},{}): relator length {}, alexander polynomial {}",
            p,
            q,
            k,
            computed.relator.len(),
            computed.alexander_polynomial
        );
        Ok(SimpleKnot { p, q, k, computed })
    }

    /// Validates `0 < q < p`, `gcd(p, q) = 1` and `0 < k < p` first.
    pub fn checked(p: u64, q: u64, k: u64) -> Result<Self> {
        validate_lens_space(p, q)?;
        if k == 0 || k >= p {
            return Err(AlexanderError::InvalidParameters {
                reason: format!("k must satisfy 0 < k < p, got k = {} with p = {}", k, p),
            });
        }
        Self::new(p, q, k)
    }

    pub fn p(&self) -> u64 {
        self.p
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn k(&self) -> u64 {
        self.k
    }
}

impl AlexanderInvariant for SimpleKnot {
    fn spec(&self) -> KnotSpec {
        KnotSpec::Simple {
            p: self.p,
            q: self.q,
            k: self.k,
        }
    }

    fn relator(&self) -> &Relator {
        &self.computed.relator
    }

    fn abelianization(&self) -> &Abelianization {
        &self.computed.abelianization
    }

    fn raw_fox_derivative(&self) -> &Laurent {
        &self.computed.raw_fox_derivative
    }

    fn alexander_polynomial(&self) -> &Laurent {
        &self.computed.alexander_polynomial
    }
}

/// The Hedden knot in L(p,q). Its homology class is fixed at `q + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeddenKnot {
    p: u64,
    q: u64,
    computed: Computed,
}

impl HeddenKnot {
    /// Computes the knot without validating the parameters.
    pub fn new(p: u64, q: u64) -> Result<Self> {
        let computed = Computed::run(hedden_relator(p, q), NormalizationPath::Hedden)?;
        log::debug!(
            "hedden({},{}): relator length {}, alexander polynomial {}",
            p,
            q,
            computed.relator.len(),
            computed.alexander_polynomial
        );
        Ok(HeddenKnot { p, q, computed })
    }

    /// Validates `0 < q < p` and `gcd(p, q) = 1` first.
    pub fn checked(p: u64, q: u64) -> Result<Self> {
        validate_lens_space(p, q)?;
        Self::new(p, q)
    }

    pub fn p(&self) -> u64 {
        self.p
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn k(&self) -> u64 {
        self.q + 1
    }
}

impl AlexanderInvariant for HeddenKnot {
    fn spec(&self) -> KnotSpec {
        KnotSpec::Hedden {
            p: self.p,
            q: self.q,
        }
    }

    fn relator(&self) -> &Relator {
        &self.computed.relator
    }

    fn abelianization(&self) -> &Abelianization {
        &self.computed.abelianization
    }

    fn raw_fox_derivative(&self) -> &Laurent {
        &self.computed.raw_fox_derivative
    }

    fn alexander_polynomial(&self) -> &Laurent {
        &self.computed.alexander_polynomial
    }
}

/// Either family, as produced by [`KnotSpec::build`].
#[derive(Debug, Clone, PartialEq)]
pub enum Knot {
    Simple(SimpleKnot),
    Hedden(HeddenKnot),
}

impl Knot {
    fn inner(&self) -> &dyn AlexanderInvariant {
        match self {
            Knot::Simple(knot) => knot as &dyn AlexanderInvariant,
            Knot::Hedden(knot) => knot,
        }
    }
}

impl AlexanderInvariant for Knot {
    fn spec(&self) -> KnotSpec {
        self.inner().spec()
    }

    fn relator(&self) -> &Relator {
        self.inner().relator()
    }

    fn abelianization(&self) -> &Abelianization {
        self.inner().abelianization()
    }

    fn raw_fox_derivative(&self) -> &Laurent {
        self.inner().raw_fox_derivative()
    }

    fn alexander_polynomial(&self) -> &Laurent {
        self.inner().alexander_polynomial()
    }
}

fn validate_lens_space(p: u64, q: u64) -> Result<()> {
    if p < 2 {
        return Err(AlexanderError::InvalidParameters {
            reason: format!("p must be at least 2, got {}", p),
        });
    }
    if q == 0 || q >= p {
        return Err(AlexanderError::InvalidParameters {
            reason: format!("q must satisfy 0 < q < p, got q = {} with p = {}", q, p),
        });
    }
    if Integer::gcd(&p, &q) != 1 {
        return Err(AlexanderError::InvalidParameters {
            reason: format!("p = {} and q = {} are not coprime", p, q),
        });
    }
    Ok(())
}

/// Summary of one knot, for display and JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct KnotReport {
    pub family: KnotFamily,
    pub p: u64,
    pub q: u64,
    pub k: u64,
    pub relator: Relator,
    pub abelianization: Abelianization,
    pub alexander_polynomial: Laurent,
    pub expression: String,
    /// Δ(1), as a decimal string.
    pub value_at_one: String,
    pub palindromic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<NormalizationTrace>,
}

impl KnotReport {
    pub fn new(knot: &dyn AlexanderInvariant) -> Self {
        let spec = knot.spec();
        let polynomial = knot.alexander_polynomial();
        KnotReport {
            family: spec.family(),
            p: spec.p(),
            q: spec.q(),
            k: spec.k(),
            relator: knot.relator().clone(),
            abelianization: *knot.abelianization(),
            alexander_polynomial: polynomial.clone(),
            expression: polynomial.to_string(),
            value_at_one: polynomial.evaluate_at_one().to_string(),
            palindromic: polynomial.is_palindromic(),
            trace: None,
        }
    }

    /// Attaches the intermediate normalization steps.
    pub fn with_trace(mut self, trace: NormalizationTrace) -> Self {
        self.trace = Some(trace);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn poly(terms: &[(i64, i64)]) -> Laurent {
        Laurent::from_terms(terms.iter().copied())
    }

    #[test]
    fn test_simple_knot_in_l21_is_trivial() {
        let knot = SimpleKnot::new(2, 1, 1).unwrap();
        assert_eq!(knot.relator().to_string(), "aba");
        assert_eq!(knot.alexander_polynomial(), &poly(&[(0, 1)]));
    }

    #[test]
    fn test_simple_knot_trefoil_polynomial() {
        let knot = SimpleKnot::new(7, 2, 3).unwrap();
        assert_eq!(knot.abelianization(), &Abelianization::new(3, -7));
        assert_eq!(knot.alexander_polynomial(), &poly(&[(-1, 1), (0, -1), (1, 1)]));
        assert!(knot.alexander_polynomial().is_palindromic());
        assert_eq!(knot.k(), 3);
    }

    #[test]
    fn test_hedden_knot_small() {
        let knot = HeddenKnot::new(3, 1).unwrap();
        assert_eq!(knot.k(), 2);
        assert_eq!(knot.relator().to_string(), "abAbaaa");
        assert_eq!(
            knot.alexander_polynomial(),
            &poly(&[(-5, 1), (-2, 1), (1, 1), (3, 1), (5, -1)])
        );
        assert_eq!(knot.alexander_polynomial().evaluate_at_one(), BigInt::from(3));
    }

    #[test]
    fn test_empty_relator_is_reported() {
        assert_eq!(SimpleKnot::new(0, 1, 1), Err(AlexanderError::EmptyRelator));
    }

    #[test]
    fn test_checked_rejects_invalid_parameters() {
        let invalid = |r: Result<SimpleKnot>| {
            matches!(r, Err(AlexanderError::InvalidParameters { .. }))
        };
        assert!(invalid(SimpleKnot::checked(1, 0, 0)));
        assert!(invalid(SimpleKnot::checked(6, 4, 1)));
        assert!(invalid(SimpleKnot::checked(5, 5, 1)));
        assert!(invalid(SimpleKnot::checked(5, 2, 0)));
        assert!(invalid(SimpleKnot::checked(5, 2, 5)));
        assert!(matches!(
            HeddenKnot::checked(9, 3),
            Err(AlexanderError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn test_checked_matches_unchecked() {
        assert_eq!(
            SimpleKnot::checked(7, 2, 3).unwrap(),
            SimpleKnot::new(7, 2, 3).unwrap()
        );
        assert_eq!(HeddenKnot::checked(5, 2).unwrap(), HeddenKnot::new(5, 2).unwrap());
    }

    #[test]
    fn test_torsion_class_fails_division() {
        assert!(matches!(
            SimpleKnot::new(4, 1, 2),
            Err(AlexanderError::InexactDivision { .. })
        ));
    }

    #[test]
    fn test_knot_enum_delegates() {
        let knot = KnotSpec::Simple { p: 7, q: 2, k: 3 }.build().unwrap();
        assert_eq!(knot.family(), KnotFamily::Simple);
        assert_eq!(knot.normalization_path(), NormalizationPath::Simple { p: 7 });
        assert_eq!(knot.relator().len(), 10);

        let trace = knot.normalization_trace().unwrap();
        assert_eq!(&trace.symmetric, knot.alexander_polynomial());
    }

    #[test]
    fn test_report_json() {
        let knot = SimpleKnot::new(7, 2, 3).unwrap();
        let report = KnotReport::new(&knot);
        assert_eq!(report.expression, "1t^(-1) + -1t^(0) + 1t^(1)");
        assert_eq!(report.value_at_one, "1");
        assert!(report.palindromic);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["family"], "simple");
        assert_eq!(json["relator"], "ababaaabaa");
        assert_eq!(json["abelianization"]["a"], 3);
        assert_eq!(json["alexander_polynomial"]["0"], "-1");
        assert!(json.get("trace").is_none());
    }

    #[test]
    fn test_report_with_trace() {
        let knot = HeddenKnot::new(5, 2).unwrap();
        let trace = knot.normalization_trace().unwrap();
        let report = KnotReport::new(&knot).with_trace(trace);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["k"], 3);
        assert!(json["trace"]["divided"].is_null());
    }
}
