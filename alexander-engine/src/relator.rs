use crate::types::{Letter, Relator};

/// Builds the relator of the simple knot in L(p,q) representing the homology
/// class k in Z/pZ.
///
/// For each `i` in `0..p` the word gains `ab` when `i*q mod p < k` and `a`
/// otherwise, so the result has between `p` and `2p` letters.
///
/// The residue is advanced one step at a time rather than computed from the
/// product, so large `p` and `q` cannot overflow.
///
/// # Example
/// ```
/// use alexander_engine::simple_relator;
///
/// assert_eq!(simple_relator(7, 2, 3).to_string(), "ababaaabaa");
/// ```
pub fn simple_relator(p: u64, q: u64, k: u64) -> Relator {
    let mut relator = Relator::new();
    let mut residue = 0;

    for _ in 0..p {
        if residue < k {
            relator.extend_from_slice(&[Letter::A, Letter::B]);
        } else {
            relator.push(Letter::A);
        }
        residue = advance(residue, q, p);
    }

    relator
}

/// Builds the relator of the Hedden knot in L(p,q).
///
/// Starts from `abAba`; then for each `i` in `0..p-1` appends `ba` when
/// `(i*q mod p) + q >= p` and `a` otherwise.
pub fn hedden_relator(p: u64, q: u64) -> Relator {
    let mut relator = Relator::from_letters(vec![
        Letter::A,
        Letter::B,
        Letter::AInverse,
        Letter::B,
        Letter::A,
    ]);
    let mut residue = 0;

    for _ in 0..p.saturating_sub(1) {
        if residue + q >= p {
            relator.extend_from_slice(&[Letter::B, Letter::A]);
        } else {
            relator.push(Letter::A);
        }
        residue = advance(residue, q, p);
    }

    relator
}

/// `(residue + q) mod p` without forming `i*q`.
fn advance(residue: u64, q: u64, p: u64) -> u64 {
    // residue < p, so residue + (q mod p) < 2p; compare before adding.
    let step = q % p;
    if residue >= p - step {
        residue - (p - step)
    } else {
        residue + step
    }
}
