//! Version gating and exactly-once release of every owned resource.

use std::sync::Arc;

use matchforge_core::{
    AbiVersion, KwargsContext, ParamSet, Result, Score, ScorerError, ScorerFlags, ScoresMut,
    StringView,
};
use matchforge_scoring::{ScorerDescriptor, ScorerFunc, ScorerRegistry};
use matchforge_test::{IndelRatio, LegacyV1, Levenshtein, ReleaseCounter, Tracked};

#[test]
fn test_v1_scorer_never_sees_uncached_or_hints() {
    let legacy = LegacyV1::new();
    let mut registry = ScorerRegistry::new();
    let registered = registry.register(legacy.clone()).unwrap();
    assert_eq!(registered.version(), AbiVersion::V1);

    let prepared = registry
        .prepare("legacy_levenshtein", &ParamSet::new())
        .unwrap();
    let a = StringView::from_text("kitten");
    let b = StringView::from_text("sitting");

    let score = prepared
        .score(&a, &b, None, Some(Score::SizeT(3)))
        .unwrap();
    assert_eq!(score, Score::SizeT(3));

    let mut cached = prepared.cached(&[&a]).unwrap();
    let buffer = cached
        .score_many(&[&a, &b], Some(Score::SizeT(5)), Some(Score::SizeT(1)))
        .unwrap();
    assert_eq!(buffer.to_scores(), vec![Score::SizeT(0), Score::SizeT(3)]);

    assert_eq!(legacy.uncached_calls(), 0);
    assert_eq!(legacy.hints_received(), 0);
    assert_eq!(legacy.calls(), 3);
}

#[test]
fn test_v1_flags_drop_batching() {
    let legacy = LegacyV1::new();
    let kwargs = legacy.init_kwargs(&ParamSet::new()).unwrap();
    let flags = legacy.scorer_flags(&kwargs).unwrap();
    assert!(!flags.supports_multi_string_init());
    assert!(!flags.supports_multi_string_call());
    assert!(flags.has_triangle_inequality());
}

/// Levenshtein claiming a descriptor version from the future.
struct FromTheFuture(u32);

impl ScorerDescriptor for FromTheFuture {
    fn name(&self) -> &str {
        "future"
    }

    fn version(&self) -> u32 {
        self.0
    }

    fn init_kwargs(&self, params: &ParamSet) -> Result<KwargsContext> {
        Levenshtein.init_kwargs(params)
    }

    fn scorer_flags(&self, kwargs: &KwargsContext) -> Result<ScorerFlags> {
        Levenshtein.scorer_flags(kwargs)
    }

    fn init_func(
        &self,
        kwargs: &KwargsContext,
        needles: &[&StringView],
    ) -> Result<Box<dyn ScorerFunc>> {
        Levenshtein.init_func(kwargs, needles)
    }
}

#[test]
fn test_unknown_versions_are_rejected() {
    let mut registry = ScorerRegistry::new();
    for version in [0, 4, u32::MAX] {
        let err = registry.register(FromTheFuture(version)).unwrap_err();
        assert_eq!(
            err,
            ScorerError::UnsupportedVersion {
                found: version,
                min: 1,
                max: 3
            }
        );
    }
    assert!(registry.is_empty());
}

#[test]
fn test_every_resource_released_once() {
    let counter = ReleaseCounter::new();
    {
        let mut registry = ScorerRegistry::new();
        registry
            .register(Tracked::new(Levenshtein, counter.clone()))
            .unwrap();
        let prepared = registry.prepare("levenshtein", &ParamSet::new()).unwrap();
        assert_eq!(counter.kwargs_created(), 1);

        let needle = counter.string("kitten");
        let haystacks: Vec<StringView> = ["sitting", "mitten", "kitten"]
            .iter()
            .map(|t| counter.string(t))
            .collect();
        let refs: Vec<&StringView> = haystacks.iter().collect();

        let mut cached = prepared.cached(&[&needle]).unwrap();
        cached.score_many(&refs, None, None).unwrap();
        prepared.score(&needle, &haystacks[0], None, None).unwrap();
        assert_eq!(counter.instances_created(), 1);
        assert_eq!(counter.instances_released(), 0);

        drop(cached);
        assert_eq!(counter.instances_released(), 1);
        assert_eq!(counter.strings_released(), 0);
    }
    assert_eq!(counter.strings_created(), 4);
    assert_eq!(counter.strings_released(), 4);
    assert_eq!(counter.kwargs_released(), 1);
    assert!(counter.all_released());
}

#[test]
fn test_kwargs_outlive_instances() {
    let counter = ReleaseCounter::new();
    let mut registry = ScorerRegistry::new();
    registry
        .register_arc(Arc::new(Tracked::new(Levenshtein, counter.clone())))
        .unwrap();

    let prepared = registry.prepare("levenshtein", &ParamSet::new()).unwrap();
    let needle = StringView::from_text("abc");
    let cached = prepared.cached(&[&needle]).unwrap();

    drop(prepared);
    assert_eq!(counter.kwargs_released(), 0);

    drop(cached);
    assert_eq!(counter.instances_released(), 1);
    assert_eq!(counter.kwargs_released(), 1);
}

#[test]
fn test_failures_release_partial_work() {
    let counter = ReleaseCounter::new();
    let mut registry = ScorerRegistry::new();
    registry
        .register(Tracked::new(IndelRatio, counter.clone()))
        .unwrap();
    registry
        .register(Tracked::new(Levenshtein, counter.clone()))
        .unwrap();

    // rejected during kwargs construction: nothing was built
    assert!(registry
        .prepare("levenshtein", &ParamSet::new().with("deletion", -1i64))
        .is_err());
    assert_eq!(counter.kwargs_created(), 0);

    {
        let prepared = registry.prepare("indel_ratio", &ParamSet::new()).unwrap();
        let a = counter.string("a");
        let b = counter.string("b");
        assert!(prepared.cached(&[&a, &b]).is_err());

        let mut cached = prepared.cached(&[&a]).unwrap();
        let mut out = [0.0f64; 1];
        assert!(cached
            .call(&[&b], Some(Score::I64(1)), None, ScoresMut::F64(&mut out))
            .is_err());
    }
    assert_eq!(counter.instances_created(), 1);
    assert!(counter.all_released());
}
