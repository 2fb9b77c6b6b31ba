//! Cached scorer instances.

use std::fmt;
use std::marker::PhantomData;

use matchforge_core::{Result, ResultDomain, Score, ScoreType, ScorerError, ScoresMut, StringView};

/// A comparator bound to one or more needles.
///
/// Built by [`ScorerDescriptor::init_func`](crate::ScorerDescriptor::init_func)
/// and released when dropped. Calls take `&mut self`: an instance is driven
/// by one thread at a time, while distinct instances share no mutable state
/// and may run concurrently.
pub trait ScorerFunc: Send {
    /// Domain of the results this instance writes.
    fn domain(&self) -> ResultDomain;

    /// Number of needles bound at construction.
    fn needle_count(&self) -> usize {
        1
    }

    /// Scores every haystack against every needle.
    ///
    /// `results` holds `haystacks.len() * needle_count()` slots laid out
    /// haystack-major: slot `h * needle_count() + n` receives needle `n`
    /// against haystack `h`.
    ///
    /// `cutoff` is a minimum for similarities and a maximum for distances.
    /// Once a result provably misses it, the worst score may be written
    /// instead of the exact value; a result that meets it is always exact.
    /// `hint` may seed internal bounds but never changes a result.
    ///
    /// # Errors
    ///
    /// On error no slot may be read. More than one haystack is only passed
    /// when the flags advertise `MULTI_STRING_CALL`.
    fn call(
        &mut self,
        haystacks: &[&StringView],
        cutoff: Score,
        hint: Option<Score>,
        results: ScoresMut<'_>,
    ) -> Result<()>;
}

/// One typed pair comparison, the part an algorithm author writes.
///
/// Wrapped by [`PairwiseFunc`], which takes care of batch layout, domain
/// checks and all-or-nothing result writes.
pub trait PairComparator<T: ScoreType>: Send {
    /// Number of needles this comparator holds.
    fn needle_count(&self) -> usize;

    /// Compares needle `needle` against `haystack`.
    fn compare(
        &mut self,
        needle: usize,
        haystack: &StringView,
        cutoff: T,
        hint: Option<T>,
    ) -> Result<T>;
}

/// Adapts a [`PairComparator`] into a [`ScorerFunc`].
///
/// Results are computed into scratch space and only copied into the caller's
/// buffer once every pair succeeded.
pub struct PairwiseFunc<T, C> {
    comparator: C,
    multi_string_call: bool,
    scratch: Vec<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C> PairwiseFunc<T, C>
where
    T: ScoreType,
    C: PairComparator<T>,
{
    /// Wraps `comparator`. Batches of haystacks are accepted only when
    /// `multi_string_call` is set.
    pub fn new(comparator: C, multi_string_call: bool) -> Self {
        Self {
            comparator,
            multi_string_call,
            scratch: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Boxes the adapter for return from a descriptor.
    pub fn boxed(comparator: C, multi_string_call: bool) -> Box<dyn ScorerFunc>
    where
        C: 'static,
    {
        Box::new(Self::new(comparator, multi_string_call))
    }

    /// The wrapped comparator.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    fn typed(score: Score, what: &str) -> Result<T> {
        T::from_score(score).ok_or_else(|| {
            ScorerError::Construction(format!(
                "{} {} is not in the {} domain",
                what,
                score,
                T::DOMAIN
            ))
        })
    }
}

impl<T, C> ScorerFunc for PairwiseFunc<T, C>
where
    T: ScoreType,
    C: PairComparator<T>,
{
    fn domain(&self) -> ResultDomain {
        T::DOMAIN
    }

    fn needle_count(&self) -> usize {
        self.comparator.needle_count()
    }

    fn call(
        &mut self,
        haystacks: &[&StringView],
        cutoff: Score,
        hint: Option<Score>,
        results: ScoresMut<'_>,
    ) -> Result<()> {
        if haystacks.is_empty() {
            return Err(ScorerError::Construction(
                "call requires at least one haystack".to_string(),
            ));
        }
        if haystacks.len() > 1 && !self.multi_string_call {
            return Err(ScorerError::Construction(format!(
                "{} haystacks passed to a scorer without MULTI_STRING_CALL",
                haystacks.len()
            )));
        }
        let cutoff = Self::typed(cutoff, "cutoff")?;
        let hint = hint.map(|h| Self::typed(h, "hint")).transpose()?;

        let needles = self.comparator.needle_count();
        let expected = haystacks.len() * needles;
        let buffer_domain = results.domain();
        let out = T::slice_of(results).ok_or_else(|| {
            ScorerError::Construction(format!(
                "{} result buffer passed to a {} scorer",
                buffer_domain,
                T::DOMAIN
            ))
        })?;
        if out.len() != expected {
            return Err(ScorerError::Construction(format!(
                "result buffer holds {} slots, expected {}",
                out.len(),
                expected
            )));
        }

        self.scratch.clear();
        for haystack in haystacks {
            for needle in 0..needles {
                let score = self.comparator.compare(needle, haystack, cutoff, hint)?;
                self.scratch.push(score);
            }
        }
        out.copy_from_slice(&self.scratch);
        Ok(())
    }
}

impl<T, C> fmt::Debug for PairwiseFunc<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairwiseFunc")
            .field("multi_string_call", &self.multi_string_call)
            .finish()
    }
}
