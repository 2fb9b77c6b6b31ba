//! Plain dynamic programs behind the fixture scorers.
//!
//! Inputs are decoded code points, so strings of different code-unit widths
//! compare by value.

/// Length of the common prefix and suffix of `a` and `b`.
///
/// The suffix never overlaps the prefix.
pub fn common_affix(a: &[u64], b: &[u64]) -> (usize, usize) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    (prefix, suffix)
}

fn trim<'a>(a: &'a [u64], b: &'a [u64]) -> (&'a [u64], &'a [u64]) {
    let (prefix, suffix) = common_affix(a, b);
    (
        &a[prefix..a.len() - suffix],
        &b[prefix..b.len() - suffix],
    )
}

/// Weighted edit distance turning `a` into `b`.
///
/// Costs saturate at `usize::MAX`.
pub fn weighted_levenshtein(a: &[u64], b: &[u64], ins: usize, del: usize, sub: usize) -> usize {
    let (a, b) = trim(a, b);
    if a.is_empty() {
        return b.len().saturating_mul(ins);
    }
    if b.is_empty() {
        return a.len().saturating_mul(del);
    }

    let mut prev: Vec<usize> = (0..=b.len()).map(|j| j.saturating_mul(ins)).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = (i + 1).saturating_mul(del);
        for (j, &cb) in b.iter().enumerate() {
            let replace = if ca == cb { 0 } else { sub };
            curr[j + 1] = curr[j]
                .saturating_add(ins)
                .min(prev[j + 1].saturating_add(del))
                .min(prev[j].saturating_add(replace));
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Length of the longest common subsequence.
pub fn lcs_length(a: &[u64], b: &[u64]) -> usize {
    let (prefix, suffix) = common_affix(a, b);
    let (a, b) = (&a[prefix..a.len() - suffix], &b[prefix..b.len() - suffix]);
    if a.is_empty() || b.is_empty() {
        return prefix + suffix;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prefix + suffix + prev[b.len()]
}

/// Insertions plus deletions needed to turn `a` into `b`.
pub fn indel_distance(a: &[u64], b: &[u64]) -> usize {
    a.len() + b.len() - 2 * lcs_length(a, b)
}

/// Indel distance normalized into a 0..=100 similarity.
///
/// Two empty strings are identical.
pub fn indel_ratio(a: &[u64], b: &[u64]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * (2 * lcs_length(a, b)) as f64 / total as f64
}

/// Upper bound on [`indel_ratio`] from the lengths alone.
pub fn indel_ratio_upper_bound(len_a: usize, len_b: usize) -> f64 {
    let total = len_a + len_b;
    if total == 0 {
        return 100.0;
    }
    100.0 * (2 * len_a.min(len_b)) as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(s: &str) -> Vec<u64> {
        s.chars().map(|c| u64::from(u32::from(c))).collect()
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(weighted_levenshtein(&cp("kitten"), &cp("sitting"), 1, 1, 1), 3);
        assert_eq!(weighted_levenshtein(&cp(""), &cp("abc"), 1, 1, 1), 3);
        assert_eq!(weighted_levenshtein(&cp("abc"), &cp("abc"), 1, 1, 1), 0);
        // substitution costlier than delete + insert
        assert_eq!(weighted_levenshtein(&cp("a"), &cp("b"), 1, 1, 5), 2);
        assert_eq!(weighted_levenshtein(&cp("ab"), &cp("abcd"), 2, 1, 1), 4);
    }

    #[test]
    fn test_levenshtein_saturates() {
        let huge = usize::MAX / 2 + 1;
        assert_eq!(weighted_levenshtein(&cp("a"), &cp("abcd"), huge, 1, 1), usize::MAX);
        assert_eq!(weighted_levenshtein(&cp("xy"), &cp("ab"), 1, huge, huge), usize::MAX);
        assert_eq!(weighted_levenshtein(&cp("xy"), &cp("ab"), huge, huge, 1), 2);
    }

    #[test]
    fn test_lcs_and_indel() {
        assert_eq!(lcs_length(&cp("kitten"), &cp("sitting")), 4);
        assert_eq!(lcs_length(&cp("abc"), &cp("")), 0);
        assert_eq!(lcs_length(&cp("aXbXc"), &cp("abc")), 3);
        assert_eq!(indel_distance(&cp("kitten"), &cp("sitting")), 5);
        assert_eq!(indel_ratio(&cp(""), &cp("")), 100.0);
        assert_eq!(indel_ratio(&cp("ab"), &cp("ab")), 100.0);
        assert_eq!(indel_ratio(&cp("ab"), &cp("cd")), 0.0);
    }

    #[test]
    fn test_upper_bound_holds() {
        let a = cp("abcdef");
        let b = cp("abc");
        assert!(indel_ratio(&a, &b) <= indel_ratio_upper_bound(a.len(), b.len()));
    }
}
