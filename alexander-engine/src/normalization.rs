use crate::error::Result;
use crate::laurent::{all_ones, Laurent};
use serde::Serialize;

/// Finishing steps applied after the Fox derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationPath {
    /// Symmetrize directly.
    Hedden,
    /// Divide out `1 + t + ... + t^(p-1)` before symmetrizing.
    Simple { p: u64 },
}

/// Every intermediate polynomial produced by [`normalize_with_trace`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizationTrace {
    pub simplified: Laurent,
    pub positive: Laurent,
    /// Only present on the simple-knot path.
    pub divided: Option<Laurent>,
    pub symmetric: Laurent,
}

/// Turns a raw Fox derivative into a symmetric Alexander polynomial.
///
/// Simplify, shift into `Z[t]`, divide by the all-ones polynomial on the
/// simple-knot path, then recentre about degree 0.
///
/// # Example
/// ```
/// use alexander_engine::{normalize, Laurent, NormalizationPath};
///
/// let raw = Laurent::from_terms([(-1, 1), (0, 0), (0, 1)]);
/// let alexander = normalize(&raw, NormalizationPath::Simple { p: 2 }).unwrap();
/// assert_eq!(alexander, Laurent::one());
/// ```
pub fn normalize(raw: &Laurent, path: NormalizationPath) -> Result<Laurent> {
    normalize_with_trace(raw, path).map(|trace| trace.symmetric)
}

/// Same as [`normalize`], keeping the intermediate polynomials.
pub fn normalize_with_trace(raw: &Laurent, path: NormalizationPath) -> Result<NormalizationTrace> {
    let simplified = raw.simplify();
    let positive = simplified.positive_normalize()?;

    let (divided, symmetric) = match path {
        NormalizationPath::Hedden => {
            let symmetric = positive.symmetrize()?;
            (None, symmetric)
        }
        NormalizationPath::Simple { p } => {
            let divided = positive.divide(&all_ones(p))?;
            let symmetric = divided.symmetrize()?;
            (Some(divided), symmetric)
        }
    };

    log::debug!("normalized {:?}: {} -> {}", path, positive, symmetric);

    Ok(NormalizationTrace {
        simplified,
        positive,
        divided,
        symmetric,
    })
}
