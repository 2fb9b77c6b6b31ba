//! Shared test fixtures for MatchForge crates.
//!
//! Reference scorers that exercise every part of the descriptor contract,
//! plus harnesses for counting releases and generating seeded strings. None
//! of this is meant as a production algorithm library.
//!
//! - [`levenshtein`] - weighted edit distance (`size_t`, metric, batched)
//! - [`indel`] - normalized Indel ratio (`f64`, none-is-worst)
//! - [`lcs`] - LCS similarity (`i64`, version 2, single string only)
//! - [`legacy`] - a version 1 scorer that records what the host sent it
//! - [`tracked`] - release counting around any descriptor
//! - [`strings`] - seeded random strings across every code-unit width
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! matchforge-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use matchforge_test::{standard_registry, strings::random_pairs};
//! ```

pub mod algorithms;
pub mod indel;
pub mod lcs;
pub mod legacy;
pub mod levenshtein;
pub mod strings;
pub mod tracked;

pub use indel::IndelRatio;
pub use lcs::LcsSeq;
pub use legacy::LegacyV1;
pub use levenshtein::{Levenshtein, LevenshteinWeights};
pub use tracked::{ReleaseCounter, Tracked};

use matchforge_core::{Score, ScoreType};
use matchforge_scoring::ScorerRegistry;

/// Registry holding [`Levenshtein`], [`IndelRatio`] and [`LcsSeq`].
pub fn standard_registry() -> ScorerRegistry {
    let mut registry = ScorerRegistry::new();
    registry.register(Levenshtein).expect("levenshtein registers");
    registry.register(IndelRatio).expect("indel registers");
    registry.register(LcsSeq).expect("lcs registers");
    registry
}

/// Compares results of two evaluation paths.
///
/// `f64` scores match within a relative tolerance of `1e-9`; integer
/// domains must be equal.
pub fn approx_eq<T: ScoreType>(a: T, b: T) -> bool {
    match (a.into_score(), b.into_score()) {
        (Score::F64(x), Score::F64(y)) => {
            (x - y).abs() <= 1e-9 * x.abs().max(y.abs()).max(1.0)
        }
        (x, y) => x == y,
    }
}
