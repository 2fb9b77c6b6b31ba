//! Seeded random strings.
//!
//! Each generated pair draws both strings from the same five-letter
//! alphabet so that distances are neither trivially zero nor trivially
//! maximal. The alphabet is shifted into the range of a chosen code-unit
//! width, so every width gets exercised.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use matchforge_core::{CharKind, StringView};

const ALPHABET_SIZE: u64 = 5;

/// Seeded generator used by all fixtures.
pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// First code point of the alphabet for `kind`.
pub fn alphabet_base(kind: CharKind) -> u64 {
    match kind {
        CharKind::U8 => u64::from(b'a'),
        CharKind::U16 => 0x0430,
        CharKind::U32 => 0x1F600,
        CharKind::U64 => 1 << 40,
    }
}

/// A string of up to `max_len` code points whose narrowest kind is `kind`
/// (or [`CharKind::U8`] when empty).
pub fn random_view<R: Rng>(rng: &mut R, max_len: usize, kind: CharKind) -> StringView {
    let len = rng.random_range(0..=max_len);
    let base = alphabet_base(kind);
    StringView::from_code_points((0..len).map(|_| base + rng.random_range(0..ALPHABET_SIZE)))
}

fn random_kind<R: Rng>(rng: &mut R) -> CharKind {
    CharKind::ALL[rng.random_range(0..CharKind::ALL.len())]
}

/// `count` pairs, each pair sharing a randomly chosen width.
pub fn random_pairs(seed: u64, count: usize, max_len: usize) -> Vec<(StringView, StringView)> {
    let mut rng = rng(seed);
    (0..count)
        .map(|_| {
            let kind = random_kind(&mut rng);
            (
                random_view(&mut rng, max_len, kind),
                random_view(&mut rng, max_len, kind),
            )
        })
        .collect()
}

/// `count` triples, each sharing a randomly chosen width.
pub fn random_triples(seed: u64, count: usize, max_len: usize) -> Vec<[StringView; 3]> {
    let mut rng = rng(seed);
    (0..count)
        .map(|_| {
            let kind = random_kind(&mut rng);
            [
                random_view(&mut rng, max_len, kind),
                random_view(&mut rng, max_len, kind),
                random_view(&mut rng, max_len, kind),
            ]
        })
        .collect()
}

/// `count` strings of the plain ASCII alphabet.
pub fn random_haystacks(seed: u64, count: usize, max_len: usize) -> Vec<StringView> {
    let mut rng = rng(seed);
    (0..count)
        .map(|_| random_view(&mut rng, max_len, CharKind::U8))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_use_requested_kind() {
        let mut rng = rng(1);
        for kind in CharKind::ALL {
            for _ in 0..20 {
                let view = random_view(&mut rng, 8, kind);
                if view.is_empty() {
                    assert_eq!(view.kind(), CharKind::U8);
                } else {
                    assert_eq!(view.kind(), kind);
                }
            }
        }
    }

    #[test]
    fn test_seeded_output_is_stable() {
        assert_eq!(random_pairs(42, 10, 12), random_pairs(42, 10, 12));
    }
}
