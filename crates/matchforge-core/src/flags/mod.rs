//! Scorer flags and static metadata.
//!
//! Flags are queried once per kwargs context, before any comparison, and
//! describe the scorer independently of concrete strings: which result
//! domain it uses, whether it accepts batches, its algebraic properties and
//! the optimal and worst scores it can produce.

mod bits;


use std::cmp::Ordering;

pub use bits::FlagBits;

use crate::error::{Result, ScorerError};
use crate::score::{ResultDomain, Score, ScoreType};

/// Static metadata describing a scorer.
///
/// # Examples
///
/// ```
/// use matchforge_core::{FlagBits, ScorerFlags, Score};
///
/// // An edit distance: lower is better, usize::MAX marks "cutoff not met".
/// let flags = ScorerFlags::for_domain(
///     FlagBits::TRIANGLE_INEQUALITY | FlagBits::MULTI_STRING_CALL,
///     0usize,
///     usize::MAX,
/// )
/// .unwrap();
///
/// assert!(flags.is_symmetric());
/// assert!(!flags.higher_is_better());
/// assert!(flags.satisfies_cutoff(Score::SizeT(2), Score::SizeT(3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorerFlags {
    bits: FlagBits,
    optimal_score: Score,
    worst_score: Score,
}

impl ScorerFlags {
    /// Creates validated flags.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Construction`] when the bits do not select
    /// exactly one result domain, contain unknown or inconsistent bits, or
    /// when the optimal and worst scores are not distinct values of that
    /// domain.
    pub fn new(bits: FlagBits, optimal_score: Score, worst_score: Score) -> Result<Self> {
        let unknown = bits.unknown_bits();
        if unknown != 0 {
            return Err(ScorerError::Construction(format!(
                "unknown scorer flag bits 0x{:08X}",
                unknown
            )));
        }
        let domain = bits.domain().ok_or_else(|| {
            ScorerError::Construction(format!(
                "scorer flags {:?} must select exactly one result domain",
                bits
            ))
        })?;
        if bits.contains(FlagBits::TRIANGLE_ONLY) && !bits.contains(FlagBits::SYMMETRIC) {
            return Err(ScorerError::Construction(
                "triangle inequality requires the symmetric flag".to_string(),
            ));
        }
        optimal_score.ensure_domain(domain)?;
        worst_score.ensure_domain(domain)?;
        match optimal_score.partial_cmp(&worst_score) {
            Some(Ordering::Less) | Some(Ordering::Greater) => {}
            _ => {
                return Err(ScorerError::Construction(format!(
                    "optimal score {} and worst score {} must differ",
                    optimal_score, worst_score
                )))
            }
        }

        Ok(Self {
            bits,
            optimal_score,
            worst_score,
        })
    }

    /// Creates flags for the domain of `T`, adding its domain bit to `extra`.
    pub fn for_domain<T: ScoreType>(extra: FlagBits, optimal: T, worst: T) -> Result<Self> {
        let bits = extra | FlagBits::for_result(T::DOMAIN);
        Self::new(bits, optimal.into_score(), worst.into_score())
    }

    /// Raw flag bits.
    pub fn bits(&self) -> FlagBits {
        self.bits
    }

    /// Result domain selected by the flags.
    pub fn domain(&self) -> ResultDomain {
        self.optimal_score.domain()
    }

    /// Best achievable score.
    pub fn optimal_score(&self) -> Score {
        self.optimal_score
    }

    /// Worst achievable score; also the "cutoff not met" sentinel.
    pub fn worst_score(&self) -> Score {
        self.worst_score
    }

    /// Instance construction may bind more than one needle.
    pub fn supports_multi_string_init(&self) -> bool {
        self.bits.contains(FlagBits::MULTI_STRING_INIT)
    }

    /// A single call may process more than one haystack.
    pub fn supports_multi_string_call(&self) -> bool {
        self.bits.contains(FlagBits::MULTI_STRING_CALL)
    }

    /// `scorer(a, b) == scorer(b, a)`.
    pub fn is_symmetric(&self) -> bool {
        self.bits.contains(FlagBits::SYMMETRIC)
    }

    /// Results form a metric; implies symmetry.
    pub fn has_triangle_inequality(&self) -> bool {
        self.bits.contains(FlagBits::TRIANGLE_INEQUALITY)
    }

    /// A `None` input collapses the result to the worst score.
    pub fn none_is_worst_score(&self) -> bool {
        self.bits.contains(FlagBits::NONE_IS_WORST_SCORE)
    }

    /// True for similarities, false for distances.
    pub fn higher_is_better(&self) -> bool {
        self.optimal_score > self.worst_score
    }

    /// Cutoff that every result satisfies.
    pub fn default_cutoff(&self) -> Score {
        self.worst_score
    }

    /// Returns true if `a` is strictly better than `b`.
    pub fn is_better(&self, a: Score, b: Score) -> bool {
        if self.higher_is_better() {
            a > b
        } else {
            a < b
        }
    }

    /// Returns true if `score` meets `cutoff`: at least the cutoff for
    /// similarities, at most the cutoff for distances.
    pub fn satisfies_cutoff(&self, score: Score, cutoff: Score) -> bool {
        if self.higher_is_better() {
            score >= cutoff
        } else {
            score <= cutoff
        }
    }

    /// Returns false once `best` is already optimal, so no further
    /// candidate can improve on it.
    pub fn can_improve_on(&self, best: Score) -> bool {
        self.is_better(self.optimal_score, best)
    }
}
