//! Tests for score values and buffers.

use super::*;

#[test]
fn test_score_domain_accessors() {
    assert_eq!(Score::F64(1.5).domain(), ResultDomain::F64);
    assert_eq!(Score::I64(-2).as_i64(), Some(-2));
    assert_eq!(Score::SizeT(3).as_usize(), Some(3));
    assert_eq!(Score::SizeT(3).as_i64(), None);
    assert_eq!(Score::I64(4).to_f64(), 4.0);
}

#[test]
fn test_score_ordering_within_domain() {
    assert!(Score::SizeT(1) < Score::SizeT(2));
    assert!(Score::F64(90.0) > Score::F64(10.0));
    assert_eq!(Score::I64(1).partial_cmp(&Score::SizeT(1)), None);
}

#[test]
fn test_ensure_domain() {
    assert!(Score::F64(0.0).ensure_domain(ResultDomain::F64).is_ok());
    let err = Score::F64(0.0).ensure_domain(ResultDomain::SizeT).unwrap_err();
    assert!(matches!(err, ScorerError::Construction(_)));
}

#[test]
fn test_from_f64_in() {
    assert_eq!(
        Score::from_f64_in(ResultDomain::F64, 72.5).unwrap(),
        Score::F64(72.5)
    );
    assert_eq!(
        Score::from_f64_in(ResultDomain::SizeT, 3.0).unwrap(),
        Score::SizeT(3)
    );
    assert_eq!(
        Score::from_f64_in(ResultDomain::I64, -4.0).unwrap(),
        Score::I64(-4)
    );

    for (domain, value) in [
        (ResultDomain::SizeT, -1.0),
        (ResultDomain::SizeT, 2.5),
        (ResultDomain::I64, 0.1),
        (ResultDomain::F64, f64::NAN),
        (ResultDomain::F64, f64::INFINITY),
    ] {
        assert!(
            matches!(Score::from_f64_in(domain, value), Err(ScorerError::Config(_))),
            "{} accepted in {}",
            value,
            domain
        );
    }
}

#[test]
fn test_score_type_round_trip() {
    assert_eq!(f64::from_score(2.5f64.into_score()), Some(2.5));
    assert_eq!(i64::from_score(Score::I64(7)), Some(7));
    assert_eq!(usize::from_score(Score::I64(7)), None);
    assert_eq!(<usize as ScoreType>::DOMAIN, ResultDomain::SizeT);
}

#[test]
fn test_scores_mut_set_and_get() {
    let mut slots = [0usize; 3];
    let mut scores = ScoresMut::SizeT(&mut slots);
    assert_eq!(scores.domain(), ResultDomain::SizeT);
    assert_eq!(scores.len(), 3);

    scores.set(1, Score::SizeT(9)).unwrap();
    assert_eq!(scores.get(1), Some(Score::SizeT(9)));
    assert!(scores.set(3, Score::SizeT(1)).is_err());
    assert!(matches!(
        scores.set(0, Score::F64(1.0)),
        Err(ScorerError::Construction(_))
    ));
    assert_eq!(slots, [0, 9, 0]);
}

#[test]
fn test_slice_of_matches_domain() {
    let mut slots = [0.0f64; 2];
    assert!(f64::slice_of(ScoresMut::F64(&mut slots)).is_some());
    assert!(i64::slice_of(ScoresMut::F64(&mut slots)).is_none());

    let wrapped = f64::wrap_slice(&mut slots);
    assert_eq!(wrapped.domain(), ResultDomain::F64);
}

#[test]
fn test_reborrow() {
    let mut slots = [0i64; 2];
    let mut scores = ScoresMut::I64(&mut slots);
    {
        let mut inner = scores.reborrow();
        inner.set(0, Score::I64(5)).unwrap();
    }
    scores.set(1, Score::I64(6)).unwrap();
    assert_eq!(scores.to_scores(), vec![Score::I64(5), Score::I64(6)]);
}

#[test]
fn test_score_buffer() {
    let mut buffer = ScoreBuffer::new(ResultDomain::F64, 2);
    assert_eq!(buffer.len(), 2);
    buffer.as_scores_mut().set(0, Score::F64(100.0)).unwrap();
    assert_eq!(buffer.get(0), Some(Score::F64(100.0)));
    assert_eq!(buffer.to_scores(), vec![Score::F64(100.0), Score::F64(0.0)]);
    assert!(ScoreBuffer::new(ResultDomain::I64, 0).is_empty());
}

#[test]
fn test_range_mut() {
    let mut slots = [0usize; 4];
    let mut scores = ScoresMut::SizeT(&mut slots);
    {
        let mut tail = scores.range_mut(2..4).unwrap();
        assert_eq!(tail.len(), 2);
        tail.set(1, Score::SizeT(8)).unwrap();
    }
    assert!(scores.range_mut(3..5).is_none());
    assert_eq!(scores.get(3), Some(Score::SizeT(8)));
}
