//! Longest common subsequence similarity.

use matchforge_core::{
    FlagBits, KwargsContext, ParamSet, Result, ScorerError, ScorerFlags, StringView,
};
use matchforge_scoring::{PairComparator, PairwiseFunc, ScorerDescriptor, ScorerFunc};

use crate::algorithms::lcs_length;

/// LCS length as an `i64` similarity.
///
/// Written against version 2 of the descriptor: it accepts score hints but
/// has no uncached call, and it neither binds several needles nor accepts
/// batches. There is no static upper bound, so the optimal score is
/// `i64::MAX`. Results below the cutoff collapse to `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LcsSeq;

struct LcsComparator {
    needle: Vec<u64>,
}

impl PairComparator<i64> for LcsComparator {
    fn needle_count(&self) -> usize {
        1
    }

    fn compare(
        &mut self,
        _needle: usize,
        haystack: &StringView,
        cutoff: i64,
        _hint: Option<i64>,
    ) -> Result<i64> {
        let upper = self.needle.len().min(haystack.len()) as i64;
        if upper < cutoff {
            return Ok(0);
        }
        let sim = lcs_length(&self.needle, &haystack.to_code_points()) as i64;
        Ok(if sim >= cutoff { sim } else { 0 })
    }
}

impl ScorerDescriptor for LcsSeq {
    fn name(&self) -> &str {
        "lcs_seq"
    }

    fn version(&self) -> u32 {
        2
    }

    fn init_kwargs(&self, params: &ParamSet) -> Result<KwargsContext> {
        params.ensure_known(&[])?;
        Ok(KwargsContext::empty())
    }

    fn scorer_flags(&self, _kwargs: &KwargsContext) -> Result<ScorerFlags> {
        ScorerFlags::for_domain(FlagBits::SYMMETRIC, i64::MAX, 0i64)
    }

    fn init_func(
        &self,
        _kwargs: &KwargsContext,
        needles: &[&StringView],
    ) -> Result<Box<dyn ScorerFunc>> {
        let [needle] = needles else {
            return Err(ScorerError::Construction(format!(
                "lcs_seq binds exactly one needle, got {}",
                needles.len()
            )));
        };
        let comparator = LcsComparator {
            needle: needle.to_code_points(),
        };
        Ok(PairwiseFunc::boxed(comparator, false))
    }
}
