use crate::types::KnotSpec;
use num_integer::Integer;

/// Every lens space parameter pair `(p, q)` with `2 <= p <= max_p`,
/// `0 < q < p` and `gcd(p, q) = 1`, ordered by `p` then `q`.
pub fn coprime_pairs(max_p: u64) -> impl Iterator<Item = (u64, u64)> {
    (2..=max_p).flat_map(|p| {
        (1..p)
            .filter(move |&q| Integer::gcd(&p, &q) == 1)
            .map(move |q| (p, q))
    })
}

/// Simple knots over [`coprime_pairs`], one per class `k` coprime to `p`.
///
/// Classes with `gcd(p, k) > 1` are skipped: the Fox derivative is not then a
/// multiple of `1 + t + ... + t^(p-1)`.
pub fn simple_specs(max_p: u64) -> impl Iterator<Item = KnotSpec> {
    coprime_pairs(max_p).flat_map(|(p, q)| {
        (1..p)
            .filter(move |&k| Integer::gcd(&p, &k) == 1)
            .map(move |k| KnotSpec::Simple { p, q, k })
    })
}

/// Hedden knots over [`coprime_pairs`].
pub fn hedden_specs(max_p: u64) -> impl Iterator<Item = KnotSpec> {
    coprime_pairs(max_p).map(|(p, q)| KnotSpec::Hedden { p, q })
}
