use crate::types::{Letter, Relator};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Images of the generators under the abelianization map to Z.
///
/// Only the images of `a` and `b` are stored; the inverses are their
/// negatives by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abelianization {
    a: i64,
    b: i64,
}

impl Abelianization {
    pub fn new(a: i64, b: i64) -> Self {
        Abelianization { a, b }
    }

    /// Image of `letter` in Z.
    pub fn image(&self, letter: Letter) -> i64 {
        match letter {
            Letter::A => self.a,
            Letter::B => self.b,
            Letter::AInverse => -self.a,
            Letter::BInverse => -self.b,
        }
    }

    /// `(letter, image)` for all four letters in `a, b, A, B` order.
    pub fn images(&self) -> [(Letter, i64); 4] {
        Letter::ALL.map(|letter| (letter, self.image(letter)))
    }
}

impl Serialize for Abelianization {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for (letter, image) in self.images() {
            map.serialize_entry(&letter.as_char(), &image)?;
        }
        map.end()
    }
}

/// Computes the abelianization of a relator by counting letters.
///
/// With `J` the number of `a` letters and `K` the number of all other letters,
/// the images are `a -> K`, `b -> -J`. This matches the true abelianization for
/// the words built by [`crate::simple_relator`], where every other letter is a
/// `b`; Hedden relators use the same count.
pub fn abelianize(relator: &Relator) -> Abelianization {
    let j = relator.count(Letter::A) as i64;
    let k = relator.len() as i64 - j;
    Abelianization::new(k, -j)
}
