//! A version 1 scorer that records how the host drives it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use matchforge_core::{
    FlagBits, KwargsContext, ParamSet, Result, Score, ScorerError, ScorerFlags, StringView,
};
use matchforge_scoring::{PairComparator, PairwiseFunc, ScorerDescriptor, ScorerFunc};

use crate::levenshtein::{Levenshtein, LevenshteinWeights};

#[derive(Debug, Default)]
struct Counters {
    uncached_calls: AtomicUsize,
    hints_received: AtomicUsize,
    calls: AtomicUsize,
}

/// Levenshtein distance published as a version 1 descriptor.
///
/// A version 1 host contract has neither hints nor an uncached call; the
/// descriptor nevertheless implements [`uncached`](ScorerDescriptor::uncached)
/// and counts every hint it sees, so tests can prove the host never used
/// either.
#[derive(Debug, Clone, Default)]
pub struct LegacyV1 {
    counters: Arc<Counters>,
}

impl LegacyV1 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uncached_calls(&self) -> usize {
        self.counters.uncached_calls.load(Ordering::SeqCst)
    }

    pub fn hints_received(&self) -> usize {
        self.counters.hints_received.load(Ordering::SeqCst)
    }

    /// Comparisons performed by cached instances.
    pub fn calls(&self) -> usize {
        self.counters.calls.load(Ordering::SeqCst)
    }
}

struct LegacyComparator {
    weights: LevenshteinWeights,
    needle: Vec<u64>,
    counters: Arc<Counters>,
}

impl PairComparator<usize> for LegacyComparator {
    fn needle_count(&self) -> usize {
        1
    }

    fn compare(
        &mut self,
        _needle: usize,
        haystack: &StringView,
        cutoff: usize,
        hint: Option<usize>,
    ) -> Result<usize> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        if hint.is_some() {
            self.counters.hints_received.fetch_add(1, Ordering::SeqCst);
        }
        Ok(self
            .weights
            .distance(&self.needle, &haystack.to_code_points(), cutoff))
    }
}

impl ScorerDescriptor for LegacyV1 {
    fn name(&self) -> &str {
        "legacy_levenshtein"
    }

    fn version(&self) -> u32 {
        1
    }

    fn init_kwargs(&self, params: &ParamSet) -> Result<KwargsContext> {
        Levenshtein.init_kwargs(params)
    }

    fn scorer_flags(&self, kwargs: &KwargsContext) -> Result<ScorerFlags> {
        let flags = Levenshtein.scorer_flags(kwargs)?;
        ScorerFlags::new(
            flags
                .bits()
                .without(FlagBits::MULTI_STRING_INIT | FlagBits::MULTI_STRING_CALL),
            flags.optimal_score(),
            flags.worst_score(),
        )
    }

    fn init_func(
        &self,
        kwargs: &KwargsContext,
        needles: &[&StringView],
    ) -> Result<Box<dyn ScorerFunc>> {
        let [needle] = needles else {
            return Err(ScorerError::Construction(
                "legacy scorer binds exactly one needle".to_string(),
            ));
        };
        let comparator = LegacyComparator {
            weights: *kwargs.downcast::<LevenshteinWeights>()?,
            needle: needle.to_code_points(),
            counters: Arc::clone(&self.counters),
        };
        Ok(PairwiseFunc::boxed(comparator, false))
    }

    fn uncached(
        &self,
        s1: &StringView,
        s2: &StringView,
        kwargs: &KwargsContext,
        cutoff: Score,
        hint: Option<Score>,
    ) -> Result<Score> {
        self.counters.uncached_calls.fetch_add(1, Ordering::SeqCst);
        if hint.is_some() {
            self.counters.hints_received.fetch_add(1, Ordering::SeqCst);
        }
        Levenshtein.uncached(s1, s2, kwargs, cutoff, hint)
    }
}
