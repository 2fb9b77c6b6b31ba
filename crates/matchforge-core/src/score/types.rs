//! Typed access to result domains.

use std::fmt::{Debug, Display};

use num_traits::{Bounded, NumCast, Zero};

use super::{ResultDomain, Score, ScoresMut};

/// A Rust type backing one result domain.
///
/// Implemented for `f64`, `i64` and `usize`. Hosts that know the domain up
/// front use this to keep every later call monomorphic instead of matching
/// on [`Score`] each time.
pub trait ScoreType:
    Copy + Debug + Display + PartialOrd + Bounded + NumCast + Zero + Send + Sync + 'static
{
    /// Domain this type represents.
    const DOMAIN: ResultDomain;

    /// Tags the value.
    fn into_score(self) -> Score;

    /// Extracts the value if `score` belongs to this domain.
    fn from_score(score: Score) -> Option<Self>;

    /// Borrows the typed slice if `scores` belongs to this domain.
    fn slice_of<'a>(scores: ScoresMut<'a>) -> Option<&'a mut [Self]>;

    /// Wraps a typed slice as a result buffer.
    fn wrap_slice(slice: &mut [Self]) -> ScoresMut<'_>;
}

impl ScoreType for f64 {
    const DOMAIN: ResultDomain = ResultDomain::F64;

    fn into_score(self) -> Score {
        Score::F64(self)
    }

    fn from_score(score: Score) -> Option<Self> {
        score.as_f64()
    }

    fn slice_of<'a>(scores: ScoresMut<'a>) -> Option<&'a mut [Self]> {
        match scores {
            ScoresMut::F64(s) => Some(s),
            _ => None,
        }
    }

    fn wrap_slice(slice: &mut [Self]) -> ScoresMut<'_> {
        ScoresMut::F64(slice)
    }
}

impl ScoreType for i64 {
    const DOMAIN: ResultDomain = ResultDomain::I64;

    fn into_score(self) -> Score {
        Score::I64(self)
    }

    fn from_score(score: Score) -> Option<Self> {
        score.as_i64()
    }

    fn slice_of<'a>(scores: ScoresMut<'a>) -> Option<&'a mut [Self]> {
        match scores {
            ScoresMut::I64(s) => Some(s),
            _ => None,
        }
    }

    fn wrap_slice(slice: &mut [Self]) -> ScoresMut<'_> {
        ScoresMut::I64(slice)
    }
}

impl ScoreType for usize {
    const DOMAIN: ResultDomain = ResultDomain::SizeT;

    fn into_score(self) -> Score {
        Score::SizeT(self)
    }

    fn from_score(score: Score) -> Option<Self> {
        score.as_usize()
    }

    fn slice_of<'a>(scores: ScoresMut<'a>) -> Option<&'a mut [Self]> {
        match scores {
            ScoresMut::SizeT(s) => Some(s),
            _ => None,
        }
    }

    fn wrap_slice(slice: &mut [Self]) -> ScoresMut<'_> {
        ScoresMut::SizeT(slice)
    }
}
