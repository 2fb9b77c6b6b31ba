//! Result buffers.

use std::ops::Range;

use super::{ResultDomain, Score};
use crate::error::{Result, ScorerError};

/// Caller-supplied result buffer, one variant per domain.
///
/// A call writes every slot or fails as a whole; after a failure the
/// contents are unspecified and must not be read.
#[derive(Debug)]
pub enum ScoresMut<'a> {
    F64(&'a mut [f64]),
    I64(&'a mut [i64]),
    SizeT(&'a mut [usize]),
}

impl ScoresMut<'_> {
    /// Domain of the buffer.
    pub fn domain(&self) -> ResultDomain {
        match self {
            ScoresMut::F64(_) => ResultDomain::F64,
            ScoresMut::I64(_) => ResultDomain::I64,
            ScoresMut::SizeT(_) => ResultDomain::SizeT,
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        match self {
            ScoresMut::F64(s) => s.len(),
            ScoresMut::I64(s) => s.len(),
            ScoresMut::SizeT(s) => s.len(),
        }
    }

    /// Returns true if the buffer has no slots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads slot `index`.
    pub fn get(&self, index: usize) -> Option<Score> {
        match self {
            ScoresMut::F64(s) => s.get(index).map(|&v| Score::F64(v)),
            ScoresMut::I64(s) => s.get(index).map(|&v| Score::I64(v)),
            ScoresMut::SizeT(s) => s.get(index).map(|&v| Score::SizeT(v)),
        }
    }

    /// Writes slot `index`.
    pub fn set(&mut self, index: usize, score: Score) -> Result<()> {
        let len = self.len();
        let slot_missing = || {
            ScorerError::Construction(format!(
                "result index {} out of range for buffer of {}",
                index, len
            ))
        };
        match (self, score) {
            (ScoresMut::F64(s), Score::F64(v)) => *s.get_mut(index).ok_or_else(slot_missing)? = v,
            (ScoresMut::I64(s), Score::I64(v)) => *s.get_mut(index).ok_or_else(slot_missing)? = v,
            (ScoresMut::SizeT(s), Score::SizeT(v)) => {
                *s.get_mut(index).ok_or_else(slot_missing)? = v
            }
            (buffer, score) => {
                return Err(ScorerError::Construction(format!(
                    "cannot store {} score in {} result buffer",
                    score.domain(),
                    buffer.domain()
                )))
            }
        }
        Ok(())
    }

    /// Shortens the borrow so the buffer can be passed on and used again.
    pub fn reborrow(&mut self) -> ScoresMut<'_> {
        match self {
            ScoresMut::F64(s) => ScoresMut::F64(s),
            ScoresMut::I64(s) => ScoresMut::I64(s),
            ScoresMut::SizeT(s) => ScoresMut::SizeT(s),
        }
    }

    /// Borrows the slots in `range`, or `None` if it is out of bounds.
    pub fn range_mut(&mut self, range: Range<usize>) -> Option<ScoresMut<'_>> {
        match self {
            ScoresMut::F64(s) => s.get_mut(range).map(ScoresMut::F64),
            ScoresMut::I64(s) => s.get_mut(range).map(ScoresMut::I64),
            ScoresMut::SizeT(s) => s.get_mut(range).map(ScoresMut::SizeT),
        }
    }

    /// Copies the contents out as tagged scores.
    pub fn to_scores(&self) -> Vec<Score> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }
}

/// Owned result buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreBuffer {
    F64(Vec<f64>),
    I64(Vec<i64>),
    SizeT(Vec<usize>),
}

impl ScoreBuffer {
    /// Allocates `len` zeroed slots in `domain`.
    pub fn new(domain: ResultDomain, len: usize) -> Self {
        match domain {
            ResultDomain::F64 => ScoreBuffer::F64(vec![0.0; len]),
            ResultDomain::I64 => ScoreBuffer::I64(vec![0; len]),
            ResultDomain::SizeT => ScoreBuffer::SizeT(vec![0; len]),
        }
    }

    /// Domain of the buffer.
    pub fn domain(&self) -> ResultDomain {
        match self {
            ScoreBuffer::F64(_) => ResultDomain::F64,
            ScoreBuffer::I64(_) => ResultDomain::I64,
            ScoreBuffer::SizeT(_) => ResultDomain::SizeT,
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        match self {
            ScoreBuffer::F64(v) => v.len(),
            ScoreBuffer::I64(v) => v.len(),
            ScoreBuffer::SizeT(v) => v.len(),
        }
    }

    /// Returns true if the buffer has no slots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the buffer for a call.
    pub fn as_scores_mut(&mut self) -> ScoresMut<'_> {
        match self {
            ScoreBuffer::F64(v) => ScoresMut::F64(v),
            ScoreBuffer::I64(v) => ScoresMut::I64(v),
            ScoreBuffer::SizeT(v) => ScoresMut::SizeT(v),
        }
    }

    /// Reads slot `index`.
    pub fn get(&self, index: usize) -> Option<Score> {
        match self {
            ScoreBuffer::F64(v) => v.get(index).map(|&s| Score::F64(s)),
            ScoreBuffer::I64(v) => v.get(index).map(|&s| Score::I64(s)),
            ScoreBuffer::SizeT(v) => v.get(index).map(|&s| Score::SizeT(s)),
        }
    }

    /// Iterates over the slots as tagged scores.
    pub fn iter(&self) -> impl Iterator<Item = Score> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Copies the contents out as tagged scores.
    pub fn to_scores(&self) -> Vec<Score> {
        self.iter().collect()
    }
}
