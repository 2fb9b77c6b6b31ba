//! Release counting for strings, kwargs contexts and scorer instances.
//!
//! Wrap any descriptor in [`Tracked`] and every kwargs context and instance
//! it hands out carries a release hook that bumps a shared counter. Strings
//! built through [`ReleaseCounter::string`] are counted the same way.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use matchforge_core::{
    KwargsContext, ParamSet, ReleaseHook, Result, ResultDomain, Score, ScorerFlags, ScoresMut,
    StringView,
};
use matchforge_scoring::{ScorerDescriptor, ScorerFunc};

#[derive(Debug, Default)]
struct Counts {
    strings_created: AtomicUsize,
    strings_released: AtomicUsize,
    kwargs_created: AtomicUsize,
    kwargs_released: AtomicUsize,
    instances_created: AtomicUsize,
    instances_released: AtomicUsize,
}

/// Shared creation and release counters.
#[derive(Debug, Clone, Default)]
pub struct ReleaseCounter {
    counts: Arc<Counts>,
}

impl ReleaseCounter {
    pub fn new() -> Self {
        Self::default()
    }

    fn hook(&self, field: fn(&Counts) -> &AtomicUsize) -> ReleaseHook {
        let counts = Arc::clone(&self.counts);
        ReleaseHook::new(move || {
            field(&counts).fetch_add(1, Ordering::SeqCst);
        })
    }

    /// A counted string.
    pub fn string(&self, text: &str) -> StringView {
        self.track(StringView::from_text(text))
    }

    /// Attaches a counting release hook to `view`.
    pub fn track(&self, view: StringView) -> StringView {
        self.counts.strings_created.fetch_add(1, Ordering::SeqCst);
        view.with_release(self.hook(|c| &c.strings_released))
    }

    pub fn strings_created(&self) -> usize {
        self.counts.strings_created.load(Ordering::SeqCst)
    }

    pub fn strings_released(&self) -> usize {
        self.counts.strings_released.load(Ordering::SeqCst)
    }

    pub fn kwargs_created(&self) -> usize {
        self.counts.kwargs_created.load(Ordering::SeqCst)
    }

    pub fn kwargs_released(&self) -> usize {
        self.counts.kwargs_released.load(Ordering::SeqCst)
    }

    pub fn instances_created(&self) -> usize {
        self.counts.instances_created.load(Ordering::SeqCst)
    }

    pub fn instances_released(&self) -> usize {
        self.counts.instances_released.load(Ordering::SeqCst)
    }

    /// Everything created so far has been released exactly once.
    pub fn all_released(&self) -> bool {
        self.strings_created() == self.strings_released()
            && self.kwargs_created() == self.kwargs_released()
            && self.instances_created() == self.instances_released()
    }
}

/// A descriptor wrapper that counts kwargs and instance releases.
pub struct Tracked<D> {
    inner: D,
    counter: ReleaseCounter,
}

impl<D: ScorerDescriptor> Tracked<D> {
    pub fn new(inner: D, counter: ReleaseCounter) -> Self {
        Self { inner, counter }
    }

    pub fn counter(&self) -> &ReleaseCounter {
        &self.counter
    }

    fn unwrap_kwargs(kwargs: &KwargsContext) -> Result<&KwargsContext> {
        Ok(&kwargs.downcast::<TrackedKwargs>()?.inner)
    }
}

struct TrackedKwargs {
    inner: KwargsContext,
}

struct TrackedFunc {
    func: Box<dyn ScorerFunc>,
    // After `func`: counted once the instance itself is gone.
    _release: ReleaseHook,
}

impl ScorerFunc for TrackedFunc {
    fn domain(&self) -> ResultDomain {
        self.func.domain()
    }

    fn needle_count(&self) -> usize {
        self.func.needle_count()
    }

    fn call(
        &mut self,
        haystacks: &[&StringView],
        cutoff: Score,
        hint: Option<Score>,
        results: ScoresMut<'_>,
    ) -> Result<()> {
        self.func.call(haystacks, cutoff, hint, results)
    }
}

impl<D: ScorerDescriptor> ScorerDescriptor for Tracked<D> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn version(&self) -> u32 {
        self.inner.version()
    }

    fn init_kwargs(&self, params: &ParamSet) -> Result<KwargsContext> {
        let inner = self.inner.init_kwargs(params)?;
        self.counter
            .counts
            .kwargs_created
            .fetch_add(1, Ordering::SeqCst);
        Ok(KwargsContext::with_release(
            TrackedKwargs { inner },
            self.counter.hook(|c| &c.kwargs_released),
        ))
    }

    fn scorer_flags(&self, kwargs: &KwargsContext) -> Result<ScorerFlags> {
        self.inner.scorer_flags(Self::unwrap_kwargs(kwargs)?)
    }

    fn init_func(
        &self,
        kwargs: &KwargsContext,
        needles: &[&StringView],
    ) -> Result<Box<dyn ScorerFunc>> {
        let func = self.inner.init_func(Self::unwrap_kwargs(kwargs)?, needles)?;
        self.counter
            .counts
            .instances_created
            .fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TrackedFunc {
            func,
            _release: self.counter.hook(|c| &c.instances_released),
        }))
    }

    fn uncached(
        &self,
        s1: &StringView,
        s2: &StringView,
        kwargs: &KwargsContext,
        cutoff: Score,
        hint: Option<Score>,
    ) -> Result<Score> {
        self.inner
            .uncached(s1, s2, Self::unwrap_kwargs(kwargs)?, cutoff, hint)
    }
}
