//! Result domains and score values.
//!
//! A scorer produces results in exactly one numeric domain, declared once in
//! its [`ScorerFlags`](crate::ScorerFlags). The tagged [`Score`] carries a
//! value together with its domain, [`ScoresMut`] is a caller-owned result
//! buffer, and [`ScoreType`] lets hosts fix the domain as a type parameter.

mod buffer;
mod types;

#[cfg(test)]
mod tests;

use std::cmp::Ordering;
use std::fmt;

pub use buffer::{ScoreBuffer, ScoresMut};
pub use types::ScoreType;

use crate::error::{Result, ScorerError};

/// Numeric domain of a scorer's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultDomain {
    /// `f64` results (normalized similarities, ratios)
    F64,
    /// `i64` results
    I64,
    /// `usize` results (distances)
    SizeT,
}

impl fmt::Display for ResultDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultDomain::F64 => write!(f, "f64"),
            ResultDomain::I64 => write!(f, "i64"),
            ResultDomain::SizeT => write!(f, "size_t"),
        }
    }
}

/// A score tagged with its domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    F64(f64),
    I64(i64),
    SizeT(usize),
}

impl Score {
    /// Domain of this score.
    pub fn domain(&self) -> ResultDomain {
        match self {
            Score::F64(_) => ResultDomain::F64,
            Score::I64(_) => ResultDomain::I64,
            Score::SizeT(_) => ResultDomain::SizeT,
        }
    }

    /// The `f64` payload, if this is an `f64` score.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Score::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// The `i64` payload, if this is an `i64` score.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Score::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// The `usize` payload, if this is a `size_t` score.
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Score::SizeT(v) => Some(*v),
            _ => None,
        }
    }

    /// Widens the payload to `f64` (lossy for very large integers).
    pub fn to_f64(&self) -> f64 {
        match self {
            Score::F64(v) => *v,
            Score::I64(v) => *v as f64,
            Score::SizeT(v) => *v as f64,
        }
    }

    /// Checks that this score belongs to `domain`.
    pub fn ensure_domain(&self, domain: ResultDomain) -> Result<()> {
        if self.domain() == domain {
            Ok(())
        } else {
            Err(ScorerError::Construction(format!(
                "score {} is in the {} domain, scorer uses {}",
                self,
                self.domain(),
                domain
            )))
        }
    }

    /// Converts a configured number into `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Config`] if `value` is not finite or cannot be
    /// represented exactly (fractions and negatives in integer domains).
    pub fn from_f64_in(domain: ResultDomain, value: f64) -> Result<Score> {
        let invalid = || {
            ScorerError::Config(format!(
                "value {} is not representable in the {} domain",
                value, domain
            ))
        };
        if !value.is_finite() {
            return Err(invalid());
        }
        match domain {
            ResultDomain::F64 => Ok(Score::F64(value)),
            ResultDomain::I64 => {
                if value.fract() != 0.0 {
                    return Err(invalid());
                }
                num_traits::cast::<f64, i64>(value)
                    .map(Score::I64)
                    .ok_or_else(invalid)
            }
            ResultDomain::SizeT => {
                if value.fract() != 0.0 {
                    return Err(invalid());
                }
                num_traits::cast::<f64, usize>(value)
                    .map(Score::SizeT)
                    .ok_or_else(invalid)
            }
        }
    }
}

impl PartialOrd for Score {
    /// Scores only compare within one domain.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Score::F64(a), Score::F64(b)) => a.partial_cmp(b),
            (Score::I64(a), Score::I64(b)) => Some(a.cmp(b)),
            (Score::SizeT(a), Score::SizeT(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::F64(v) => write!(f, "{}", v),
            Score::I64(v) => write!(f, "{}", v),
            Score::SizeT(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for Score {
    fn from(v: f64) -> Self {
        Score::F64(v)
    }
}

impl From<i64> for Score {
    fn from(v: i64) -> Self {
        Score::I64(v)
    }
}

impl From<usize> for Score {
    fn from(v: usize) -> Self {
        Score::SizeT(v)
    }
}
