//! Normalized Indel similarity in `0.0..=100.0`.

use matchforge_core::{
    FlagBits, KwargsContext, ParamSet, Result, Score, ScorerError, ScorerFlags, StringView,
};
use matchforge_scoring::{PairComparator, PairwiseFunc, ScorerDescriptor, ScorerFunc};

use crate::algorithms::{indel_ratio, indel_ratio_upper_bound};

/// The Indel ratio descriptor (version 3, takes no parameters).
///
/// A single needle per instance, but batches of haystacks are accepted.
/// Results below the cutoff collapse to `0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndelRatio;

impl IndelRatio {
    pub fn ratio(needle: &[u64], haystack: &[u64], cutoff: f64) -> f64 {
        if indel_ratio_upper_bound(needle.len(), haystack.len()) < cutoff {
            return 0.0;
        }
        let ratio = indel_ratio(needle, haystack);
        if ratio >= cutoff {
            ratio
        } else {
            0.0
        }
    }
}

struct IndelComparator {
    needle: Vec<u64>,
}

impl PairComparator<f64> for IndelComparator {
    fn needle_count(&self) -> usize {
        1
    }

    fn compare(
        &mut self,
        _needle: usize,
        haystack: &StringView,
        cutoff: f64,
        _hint: Option<f64>,
    ) -> Result<f64> {
        Ok(IndelRatio::ratio(&self.needle, &haystack.to_code_points(), cutoff))
    }
}

impl ScorerDescriptor for IndelRatio {
    fn name(&self) -> &str {
        "indel_ratio"
    }

    fn init_kwargs(&self, params: &ParamSet) -> Result<KwargsContext> {
        params.ensure_known(&[])?;
        Ok(KwargsContext::empty())
    }

    fn scorer_flags(&self, _kwargs: &KwargsContext) -> Result<ScorerFlags> {
        ScorerFlags::for_domain(
            FlagBits::SYMMETRIC | FlagBits::NONE_IS_WORST_SCORE | FlagBits::MULTI_STRING_CALL,
            100.0f64,
            0.0f64,
        )
    }

    fn init_func(
        &self,
        _kwargs: &KwargsContext,
        needles: &[&StringView],
    ) -> Result<Box<dyn ScorerFunc>> {
        let [needle] = needles else {
            return Err(ScorerError::Construction(format!(
                "indel_ratio binds exactly one needle, got {}",
                needles.len()
            )));
        };
        let comparator = IndelComparator {
            needle: needle.to_code_points(),
        };
        Ok(PairwiseFunc::boxed(comparator, true))
    }

    fn uncached(
        &self,
        s1: &StringView,
        s2: &StringView,
        _kwargs: &KwargsContext,
        cutoff: Score,
        _hint: Option<Score>,
    ) -> Result<Score> {
        let cutoff = cutoff.as_f64().ok_or_else(|| {
            ScorerError::Construction(format!("indel_ratio cutoff {} is not f64", cutoff))
        })?;
        Ok(Score::F64(IndelRatio::ratio(
            &s1.to_code_points(),
            &s2.to_code_points(),
            cutoff,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(s: &str) -> Vec<u64> {
        s.chars().map(|c| u64::from(u32::from(c))).collect()
    }

    #[test]
    fn test_ratio_with_cutoff() {
        let r = IndelRatio::ratio(&cp("kitten"), &cp("sitting"), 0.0);
        assert!((r - 800.0 / 13.0).abs() < 1e-9);
        assert_eq!(IndelRatio::ratio(&cp("kitten"), &cp("sitting"), 70.0), 0.0);
        // pruned by length alone
        assert_eq!(IndelRatio::ratio(&cp("a"), &cp("abcdefgh"), 50.0), 0.0);
    }

    #[test]
    fn test_rejects_multiple_needles() {
        let kwargs = IndelRatio.init_kwargs(&ParamSet::new()).unwrap();
        let a = StringView::from_text("a");
        let b = StringView::from_text("b");
        assert!(IndelRatio.init_func(&kwargs, &[&a, &b]).is_err());
        assert!(IndelRatio.init_func(&kwargs, &[&a]).is_ok());
    }
}
