//! Parallel scoring agrees with sequential scoring.

use matchforge_core::{ParamSet, StringView};
use matchforge_scoring::score_parallel;
use matchforge_test::standard_registry;
use matchforge_test::strings::random_haystacks;

#[test]
fn test_parallel_equals_sequential() {
    let scorer = standard_registry()
        .prepare("levenshtein", &ParamSet::new())
        .unwrap()
        .typed::<usize>()
        .unwrap();
    let needle = StringView::from_text("abcabc");
    let haystacks = random_haystacks(9, 500, 20);
    let refs: Vec<&StringView> = haystacks.iter().collect();

    for cutoff in [None, Some(4)] {
        let mut sequential = vec![0usize; haystacks.len()];
        scorer
            .cached(&[&needle])
            .unwrap()
            .score_into(&refs, cutoff, None, &mut sequential)
            .unwrap();

        for chunk_size in [1, 32, 1000] {
            let parallel =
                score_parallel(&scorer, &needle, &haystacks, cutoff, None, chunk_size).unwrap();
            assert_eq!(parallel, sequential);
        }
    }
}

#[test]
fn test_parallel_without_multi_string_call() {
    let scorer = standard_registry()
        .prepare("lcs_seq", &ParamSet::new())
        .unwrap()
        .typed::<i64>()
        .unwrap();
    let needle = StringView::from_text("abcde");
    let haystacks = random_haystacks(10, 120, 12);

    let parallel = score_parallel(&scorer, &needle, &haystacks, None, None, 16).unwrap();
    for (haystack, score) in haystacks.iter().zip(&parallel) {
        assert_eq!(scorer.score(&needle, haystack, None, None).unwrap(), *score);
    }
}
