//! Property checks over seeded random inputs: symmetry, triangle
//! inequality, cutoff monotonicity and score bounds.

use matchforge_core::{ParamSet, ScoreType};
use matchforge_scoring::TypedScorer;
use matchforge_test::{approx_eq, standard_registry};
use matchforge_test::strings::{random_pairs, random_triples};

const SEED: u64 = 2024;

fn typed<T: ScoreType>(name: &str, params: &ParamSet) -> TypedScorer<T> {
    standard_registry()
        .prepare(name, params)
        .unwrap()
        .typed::<T>()
        .unwrap()
}

fn check_symmetry<T: ScoreType>(scorer: &TypedScorer<T>) {
    assert!(scorer.prepared().flags().is_symmetric());
    for (a, b) in random_pairs(SEED, 50, 16) {
        let ab = scorer.score(&a, &b, None, None).unwrap();
        let ba = scorer.score(&b, &a, None, None).unwrap();
        assert!(approx_eq(ab, ba), "{}: {ab} != {ba} for {a:?} / {b:?}", scorer.name());
    }
}

#[test]
fn test_symmetry() {
    check_symmetry(&typed::<usize>("levenshtein", &ParamSet::new()));
    check_symmetry(&typed::<usize>(
        "levenshtein",
        &ParamSet::new().with("substitution", 3i64),
    ));
    check_symmetry(&typed::<f64>("indel_ratio", &ParamSet::new()));
    check_symmetry(&typed::<i64>("lcs_seq", &ParamSet::new()));
}

#[test]
fn test_weighted_levenshtein_is_not_symmetric() {
    let scorer = typed::<usize>("levenshtein", &ParamSet::new().with("insertion", 3i64));
    assert!(!scorer.prepared().flags().is_symmetric());
    let short = matchforge_core::StringView::from_text("ab");
    let long = matchforge_core::StringView::from_text("abcd");
    assert_eq!(scorer.score(&short, &long, None, None).unwrap(), 6);
    assert_eq!(scorer.score(&long, &short, None, None).unwrap(), 2);
}

#[test]
fn test_triangle_inequality() {
    let scorer = typed::<usize>("levenshtein", &ParamSet::new());
    assert!(scorer.prepared().flags().has_triangle_inequality());
    for [a, b, c] in random_triples(SEED, 50, 12) {
        let ab = scorer.score(&a, &b, None, None).unwrap();
        let bc = scorer.score(&b, &c, None, None).unwrap();
        let ac = scorer.score(&a, &c, None, None).unwrap();
        assert!(ac <= ab + bc, "{ac} > {ab} + {bc}");
    }
}

#[test]
fn test_distance_cutoff_monotonicity() {
    let scorer = typed::<usize>("levenshtein", &ParamSet::new());
    for (a, b) in random_pairs(SEED + 1, 50, 10) {
        let exact = scorer.score(&a, &b, None, None).unwrap();
        assert_ne!(exact, scorer.worst());
        for cutoff in 0..=12 {
            let pruned = scorer.score(&a, &b, Some(cutoff), None).unwrap();
            if exact <= cutoff {
                assert_eq!(pruned, exact);
            } else {
                assert_eq!(pruned, scorer.worst());
            }
        }
    }
}

#[test]
fn test_similarity_cutoff_monotonicity() {
    let scorer = typed::<f64>("indel_ratio", &ParamSet::new());
    for (a, b) in random_pairs(SEED + 2, 50, 10) {
        let exact = scorer.score(&a, &b, None, None).unwrap();
        for cutoff in [0.0, 10.0, 33.3, 50.0, 66.7, 90.0, 100.0] {
            let pruned = scorer.score(&a, &b, Some(cutoff), None).unwrap();
            if exact >= cutoff {
                assert!(approx_eq(pruned, exact));
            } else {
                assert_eq!(pruned, scorer.worst());
            }
        }
    }
}

#[test]
fn test_hints_never_change_results() {
    let scorer = typed::<usize>("levenshtein", &ParamSet::new());
    for (a, b) in random_pairs(SEED + 3, 30, 10) {
        let plain = scorer.score(&a, &b, None, None).unwrap();
        for hint in [0, 1, 5, 100] {
            assert_eq!(scorer.score(&a, &b, None, Some(hint)).unwrap(), plain);
        }
    }
}

#[test]
fn test_scores_within_bounds() {
    let indel = typed::<f64>("indel_ratio", &ParamSet::new());
    let lcs = typed::<i64>("lcs_seq", &ParamSet::new());
    for (a, b) in random_pairs(SEED + 4, 50, 10) {
        let ratio = indel.score(&a, &b, None, None).unwrap();
        assert!((indel.worst()..=indel.optimal()).contains(&ratio));

        let sim = lcs.score(&a, &b, None, None).unwrap();
        assert!(sim >= lcs.worst());
        assert!(sim as usize <= a.len().min(b.len()));
    }
    let same = matchforge_core::StringView::from_text("same");
    assert_eq!(indel.score(&same, &same, None, None).unwrap(), indel.optimal());
}
