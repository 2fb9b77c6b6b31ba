//! A minimal in-crate scorer used by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use matchforge_core::{
    FlagBits, KwargsContext, ParamSet, Result, Score, ScorerError, ScorerFlags, StringView,
};

use crate::descriptor::ScorerDescriptor;
use crate::func::{PairComparator, PairwiseFunc, ScorerFunc};

/// Absolute length difference, as a distance. Fails on [`LengthDiff::POISON`].
pub struct LengthDiff {
    needles: Vec<StringView>,
    hints_seen: Arc<AtomicUsize>,
}

impl LengthDiff {
    pub const POISON: &'static str = "<poison>";

    pub fn new(needles: &[&str]) -> Self {
        Self {
            needles: needles.iter().map(|n| StringView::from_text(n)).collect(),
            hints_seen: Arc::default(),
        }
    }

    pub fn distance(a: &StringView, b: &StringView) -> i64 {
        (a.len() as i64 - b.len() as i64).abs()
    }
}

impl PairComparator<i64> for LengthDiff {
    fn needle_count(&self) -> usize {
        self.needles.len()
    }

    fn compare(
        &mut self,
        needle: usize,
        haystack: &StringView,
        cutoff: i64,
        hint: Option<i64>,
    ) -> Result<i64> {
        if hint.is_some() {
            self.hints_seen.fetch_add(1, Ordering::SeqCst);
        }
        if haystack.to_text().as_deref() == Some(Self::POISON) {
            return Err(ScorerError::Construction("poisoned haystack".to_string()));
        }
        let dist = Self::distance(&self.needles[needle], haystack);
        Ok(if dist <= cutoff { dist } else { i64::MAX })
    }
}

/// Descriptor over [`LengthDiff`] with a configurable version.
pub struct StubDescriptor {
    pub version: u32,
    pub uncached_calls: AtomicUsize,
    pub hints_seen: Arc<AtomicUsize>,
}

impl StubDescriptor {
    pub fn new(version: u32) -> Arc<Self> {
        Arc::new(Self {
            version,
            uncached_calls: AtomicUsize::new(0),
            hints_seen: Arc::default(),
        })
    }

    pub fn hints_seen(&self) -> usize {
        self.hints_seen.load(Ordering::SeqCst)
    }

    pub fn uncached_calls(&self) -> usize {
        self.uncached_calls.load(Ordering::SeqCst)
    }
}

impl ScorerDescriptor for StubDescriptor {
    fn name(&self) -> &str {
        "length_diff"
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn init_kwargs(&self, params: &ParamSet) -> Result<KwargsContext> {
        params.ensure_known(&[])?;
        Ok(KwargsContext::empty())
    }

    fn scorer_flags(&self, _kwargs: &KwargsContext) -> Result<ScorerFlags> {
        ScorerFlags::for_domain(
            FlagBits::SYMMETRIC | FlagBits::MULTI_STRING_INIT | FlagBits::MULTI_STRING_CALL,
            0i64,
            i64::MAX,
        )
    }

    fn init_func(
        &self,
        _kwargs: &KwargsContext,
        needles: &[&StringView],
    ) -> Result<Box<dyn ScorerFunc>> {
        let comparator = LengthDiff {
            needles: needles.iter().map(|n| (*n).clone()).collect(),
            hints_seen: Arc::clone(&self.hints_seen),
        };
        Ok(PairwiseFunc::boxed(comparator, true))
    }

    fn uncached(
        &self,
        s1: &StringView,
        s2: &StringView,
        _kwargs: &KwargsContext,
        cutoff: Score,
        hint: Option<Score>,
    ) -> Result<Score> {
        self.uncached_calls.fetch_add(1, Ordering::SeqCst);
        if hint.is_some() {
            self.hints_seen.fetch_add(1, Ordering::SeqCst);
        }
        let cutoff = cutoff.as_i64().ok_or_else(|| {
            ScorerError::Construction("length_diff expects an i64 cutoff".to_string())
        })?;
        let dist = LengthDiff::distance(s1, s2);
        Ok(Score::I64(if dist <= cutoff { dist } else { i64::MAX }))
    }
}
