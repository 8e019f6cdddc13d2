//! Alexander polynomials of simple knots and Hedden knots in lens spaces.
//!
//! The pipeline runs relator -> abelianization -> Fox derivative ->
//! normalization, all in exact integer arithmetic on [`Laurent`] polynomials.

pub mod abelianization;
pub mod error;
pub mod fox;
pub mod knot;
pub mod laurent;
pub mod normalization;
pub mod relator;
pub mod sweep;
pub mod types;

pub use abelianization::{abelianize, Abelianization};
pub use error::{AlexanderError, Result};
pub use fox::{fox_derivative_a, FoxAccumulator, IncrementalUpdate};
pub use knot::{AlexanderInvariant, HeddenKnot, Knot, KnotReport, SimpleKnot};
pub use laurent::{all_ones, laurent_to_string, Laurent};
pub use normalization::{normalize, normalize_with_trace, NormalizationPath, NormalizationTrace};
pub use relator::{hedden_relator, simple_relator};
pub use types::{KnotFamily, KnotSpec, Letter, Relator};
