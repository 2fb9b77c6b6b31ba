//! Scorers with the result domain fixed at compile time.

use std::fmt;
use std::marker::PhantomData;
use std::slice;

use matchforge_core::{Result, ScoreType, ScorerError, StringView};

use crate::prepared::{CachedScorer, PreparedScorer};

/// A [`PreparedScorer`] whose domain has been checked against `T` once, so
/// results come back as plain `T` values.
#[derive(Clone)]
pub struct TypedScorer<T> {
    prepared: PreparedScorer,
    optimal: T,
    worst: T,
}

impl<T: ScoreType> TypedScorer<T> {
    /// Fixes `prepared` to the domain of `T`.
    pub fn new(prepared: PreparedScorer) -> Result<Self> {
        let flags = *prepared.flags();
        let mismatch = || {
            ScorerError::Construction(format!(
                "scorer '{}' produces {} scores, requested {}",
                prepared.name(),
                flags.domain(),
                T::DOMAIN
            ))
        };
        let optimal = T::from_score(flags.optimal_score()).ok_or_else(mismatch)?;
        let worst = T::from_score(flags.worst_score()).ok_or_else(mismatch)?;
        Ok(Self {
            prepared,
            optimal,
            worst,
        })
    }

    pub fn prepared(&self) -> &PreparedScorer {
        &self.prepared
    }

    pub fn name(&self) -> &str {
        self.prepared.name()
    }

    pub fn optimal(&self) -> T {
        self.optimal
    }

    /// Worst score, also written when a result misses its cutoff.
    pub fn worst(&self) -> T {
        self.worst
    }

    pub fn higher_is_better(&self) -> bool {
        self.optimal > self.worst
    }

    /// Returns true if `score` meets `cutoff`.
    pub fn satisfies_cutoff(&self, score: T, cutoff: T) -> bool {
        if self.higher_is_better() {
            score >= cutoff
        } else {
            score <= cutoff
        }
    }

    pub fn cached(&self, needles: &[&StringView]) -> Result<TypedCachedScorer<T>> {
        let inner = self.prepared.cached(needles)?;
        Ok(TypedCachedScorer {
            inner,
            _marker: PhantomData,
        })
    }

    /// Scores one pair; see [`PreparedScorer::score`].
    pub fn score(
        &self,
        s1: &StringView,
        s2: &StringView,
        cutoff: Option<T>,
        hint: Option<T>,
    ) -> Result<T> {
        let score = self.prepared.score(
            s1,
            s2,
            cutoff.map(T::into_score),
            hint.map(T::into_score),
        )?;
        T::from_score(score).ok_or_else(|| {
            ScorerError::Construction(format!(
                "scorer '{}' returned {} for a {} domain",
                self.name(),
                score,
                T::DOMAIN
            ))
        })
    }
}

impl<T: fmt::Debug> fmt::Debug for TypedScorer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedScorer")
            .field("prepared", &self.prepared)
            .field("optimal", &self.optimal)
            .field("worst", &self.worst)
            .finish()
    }
}

/// A cached instance writing into plain `&mut [T]` buffers.
pub struct TypedCachedScorer<T> {
    inner: CachedScorer,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ScoreType> TypedCachedScorer<T> {
    pub fn needle_count(&self) -> usize {
        self.inner.needle_count()
    }

    pub fn inner_mut(&mut self) -> &mut CachedScorer {
        &mut self.inner
    }

    /// One validated call; see [`CachedScorer::call`].
    pub fn call(
        &mut self,
        haystacks: &[&StringView],
        cutoff: Option<T>,
        hint: Option<T>,
        out: &mut [T],
    ) -> Result<()> {
        self.inner.call(
            haystacks,
            cutoff.map(T::into_score),
            hint.map(T::into_score),
            T::wrap_slice(out),
        )
    }

    /// Scores any number of haystacks into `out`, splitting the batch when
    /// the scorer lacks `MULTI_STRING_CALL`.
    pub fn score_into(
        &mut self,
        haystacks: &[&StringView],
        cutoff: Option<T>,
        hint: Option<T>,
        out: &mut [T],
    ) -> Result<()> {
        let width = self.needle_count();
        if out.len() != haystacks.len() * width {
            return Err(ScorerError::Construction(format!(
                "result buffer holds {} slots, expected {}",
                out.len(),
                haystacks.len() * width
            )));
        }
        if haystacks.len() <= 1 || self.inner.flags().supports_multi_string_call() {
            return self.call(haystacks, cutoff, hint, out);
        }
        for (haystack, chunk) in haystacks.iter().zip(out.chunks_mut(width)) {
            self.call(slice::from_ref(haystack), cutoff, hint, chunk)?;
        }
        Ok(())
    }

    pub fn score_one(
        &mut self,
        haystack: &StringView,
        cutoff: Option<T>,
        hint: Option<T>,
    ) -> Result<T> {
        let mut out = [T::zero()];
        self.score_into(&[haystack], cutoff, hint, &mut out)?;
        Ok(out[0])
    }
}

impl<T> fmt::Debug for TypedCachedScorer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedCachedScorer").field(&self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegisteredScorer;
    use crate::test_utils::StubDescriptor;
    use matchforge_core::ParamSet;

    fn typed() -> TypedScorer<i64> {
        RegisteredScorer::negotiate(StubDescriptor::new(3))
            .unwrap()
            .prepare(&ParamSet::new())
            .unwrap()
            .typed::<i64>()
            .unwrap()
    }

    #[test]
    fn test_domain_is_checked_once() {
        let prepared = RegisteredScorer::negotiate(StubDescriptor::new(3))
            .unwrap()
            .prepare(&ParamSet::new())
            .unwrap();
        assert!(prepared.typed::<f64>().is_err());
        assert!(prepared.typed::<usize>().is_err());

        let scorer = prepared.typed::<i64>().unwrap();
        assert_eq!(scorer.optimal(), 0);
        assert_eq!(scorer.worst(), i64::MAX);
        assert!(!scorer.higher_is_better());
        assert!(scorer.satisfies_cutoff(2, 3));
        assert!(!scorer.satisfies_cutoff(4, 3));
    }

    #[test]
    fn test_score_into_and_one() {
        let scorer = typed();
        let needle = StringView::from_text("abc");
        let mut cached = scorer.cached(&[&needle]).unwrap();

        let a = StringView::from_text("a");
        let b = StringView::from_text("abcdef");
        let mut out = [0i64; 2];
        cached.score_into(&[&a, &b], None, None, &mut out).unwrap();
        assert_eq!(out, [2, 3]);

        assert_eq!(cached.score_one(&b, Some(2), None).unwrap(), i64::MAX);
        assert_eq!(scorer.score(&needle, &b, None, None).unwrap(), 3);
    }

    #[test]
    fn test_score_into_checks_size() {
        let scorer = typed();
        let needle = StringView::from_text("abc");
        let mut cached = scorer.cached(&[&needle]).unwrap();
        let a = StringView::from_text("a");
        let mut out = [0i64; 3];
        assert!(cached.score_into(&[&a], None, None, &mut out).is_err());
    }
}
