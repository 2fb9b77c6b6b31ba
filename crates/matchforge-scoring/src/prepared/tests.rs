use super::*;
use crate::registry::RegisteredScorer;
use crate::test_utils::StubDescriptor;
use matchforge_core::{DefaultProcess, ScoresMut};
use std::sync::Arc;

fn prepare(descriptor: &Arc<StubDescriptor>) -> PreparedScorer {
    RegisteredScorer::negotiate(descriptor.clone())
        .unwrap()
        .prepare(&ParamSet::new())
        .unwrap()
}

#[test]
fn test_prepare_rejects_unknown_params() {
    let registered = RegisteredScorer::negotiate(StubDescriptor::new(3)).unwrap();
    let err = registered
        .prepare(&ParamSet::new().with("weights", 1i64))
        .unwrap_err();
    assert!(matches!(err, ScorerError::Config(_)));
}

#[test]
fn test_cutoff_defaults_to_worst() {
    let prepared = prepare(&StubDescriptor::new(3));
    assert_eq!(prepared.resolve_cutoff(None).unwrap(), Score::I64(i64::MAX));
    assert_eq!(
        prepared.resolve_cutoff(Some(Score::I64(4))).unwrap(),
        Score::I64(4)
    );
    assert!(prepared.resolve_cutoff(Some(Score::F64(4.0))).is_err());
}

#[test]
fn test_hint_dropped_for_v1() {
    let v1 = prepare(&StubDescriptor::new(1));
    assert_eq!(v1.resolve_hint(Some(Score::I64(1))).unwrap(), None);

    let v2 = prepare(&StubDescriptor::new(2));
    assert_eq!(
        v2.resolve_hint(Some(Score::I64(1))).unwrap(),
        Some(Score::I64(1))
    );
    assert!(v2.resolve_hint(Some(Score::SizeT(1))).is_err());
}

#[test]
fn test_score_uses_uncached_only_on_v3() {
    let s1 = StringView::from_text("abc");
    let s2 = StringView::from_text("abcde");

    let v3 = StubDescriptor::new(3);
    assert_eq!(
        prepare(&v3).score(&s1, &s2, None, None).unwrap(),
        Score::I64(2)
    );
    assert_eq!(v3.uncached_calls(), 1);

    for version in [1, 2] {
        let older = StubDescriptor::new(version);
        assert_eq!(
            prepare(&older).score(&s1, &s2, None, None).unwrap(),
            Score::I64(2)
        );
        assert_eq!(older.uncached_calls(), 0);
    }
}

#[test]
fn test_v1_never_sees_hints() {
    let v1 = StubDescriptor::new(1);
    let prepared = prepare(&v1);
    let needle = StringView::from_text("abc");
    let hay = StringView::from_text("ab");

    prepared
        .score(&needle, &hay, None, Some(Score::I64(1)))
        .unwrap();
    let mut cached = prepared.cached(&[&needle]).unwrap();
    cached.score_one(&hay, None, Some(Score::I64(1))).unwrap();
    assert_eq!(v1.hints_seen(), 0);

    let v2 = StubDescriptor::new(2);
    prepare(&v2)
        .score(&needle, &hay, None, Some(Score::I64(1)))
        .unwrap();
    assert_eq!(v2.hints_seen(), 1);
}

#[test]
fn test_cached_validation() {
    let prepared = prepare(&StubDescriptor::new(3));
    assert!(matches!(
        prepared.cached(&[]).unwrap_err(),
        ScorerError::Construction(_)
    ));

    let needle = StringView::from_text("abc");
    let mut cached = prepared.cached(&[&needle]).unwrap();
    assert_eq!(cached.domain(), matchforge_core::ResultDomain::I64);
    assert_eq!(cached.needle_count(), 1);

    let hay = StringView::from_text("a");
    let mut wrong_domain = [0.0f64; 1];
    assert!(cached
        .call(&[&hay], None, None, ScoresMut::F64(&mut wrong_domain))
        .is_err());
    let mut wrong_len = [0i64; 3];
    assert!(cached
        .call(&[&hay], None, None, ScoresMut::I64(&mut wrong_len))
        .is_err());
    assert!(cached
        .call(&[], None, None, ScoresMut::I64(&mut []))
        .is_err());
}

#[test]
fn test_score_many_multi_needle() {
    let prepared = prepare(&StubDescriptor::new(3));
    let n1 = StringView::from_text("a");
    let n2 = StringView::from_text("abcd");
    let mut cached = prepared.cached(&[&n1, &n2]).unwrap();

    let h1 = StringView::from_text("ab");
    let h2 = StringView::from_text("abcdef");
    let buffer = cached.score_many(&[&h1, &h2], None, None).unwrap();
    assert_eq!(
        buffer.to_scores(),
        vec![Score::I64(1), Score::I64(2), Score::I64(5), Score::I64(2)]
    );
    assert!(cached.score_one(&h1, None, None).is_err());
}

#[test]
fn test_score_values() {
    let prepared = prepare(&StubDescriptor::new(3));
    let score = prepared
        .score_values(
            &HostValue::from("  A-B  "),
            &HostValue::from("ab"),
            Some(&DefaultProcess),
            None,
            None,
        )
        .unwrap();
    // "a b" against "ab"
    assert_eq!(score, Score::I64(1));

    let err = prepared
        .score_values(&HostValue::None, &HostValue::from("ab"), None, None, None)
        .unwrap_err();
    assert!(matches!(err, ScorerError::Conversion(_)));

    let err = prepared
        .score_values(&HostValue::Integer(3), &HostValue::from("ab"), None, None, None)
        .unwrap_err();
    assert!(matches!(err, ScorerError::Conversion(_)));
}
