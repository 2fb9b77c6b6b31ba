//! Weighted Levenshtein distance.
//!
//! Parameters: `insertion`, `deletion`, `substitution` (non-negative
//! integers, default 1) or `weights = [ins, del, sub]`. The scorer is a
//! metric only when insertions and deletions cost the same.

use matchforge_core::{
    FlagBits, KwargsContext, ParamSet, ParamValue, Result, Score, ScorerError, ScorerFlags,
    StringView,
};
use matchforge_scoring::{PairComparator, PairwiseFunc, ScorerDescriptor, ScorerFunc};

use crate::algorithms::weighted_levenshtein;

/// Per-operation costs held in the kwargs context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevenshteinWeights {
    pub insertion: usize,
    pub deletion: usize,
    pub substitution: usize,
}

impl Default for LevenshteinWeights {
    fn default() -> Self {
        Self {
            insertion: 1,
            deletion: 1,
            substitution: 1,
        }
    }
}

impl LevenshteinWeights {
    /// Parses and validates a parameter set.
    pub fn from_params(params: &ParamSet) -> Result<Self> {
        params.ensure_known(&["insertion", "deletion", "substitution", "weights"])?;

        let mut weights = Self::default();
        if let Some(list) = params.get_list("weights")? {
            if ["insertion", "deletion", "substitution"]
                .iter()
                .any(|k| params.get(k).is_some())
            {
                return Err(ScorerError::Config(
                    "'weights' cannot be combined with individual weights".to_string(),
                ));
            }
            let [ins, del, sub] = list else {
                return Err(ScorerError::Config(format!(
                    "'weights' needs exactly 3 entries, got {}",
                    list.len()
                )));
            };
            weights.insertion = Self::cost("weights[0]", ins.as_int())?;
            weights.deletion = Self::cost("weights[1]", del.as_int())?;
            weights.substitution = Self::cost("weights[2]", sub.as_int())?;
        } else {
            if let Some(v) = params.get_int("insertion")? {
                weights.insertion = Self::cost("insertion", Some(v))?;
            }
            if let Some(v) = params.get_int("deletion")? {
                weights.deletion = Self::cost("deletion", Some(v))?;
            }
            if let Some(v) = params.get_int("substitution")? {
                weights.substitution = Self::cost("substitution", Some(v))?;
            }
        }

        if weights.insertion == 0 && weights.deletion == 0 && weights.substitution == 0 {
            return Err(ScorerError::Config(
                "at least one Levenshtein weight must be positive".to_string(),
            ));
        }
        Ok(weights)
    }

    fn cost(name: &str, value: Option<i64>) -> Result<usize> {
        match value {
            Some(v) if v >= 0 => usize::try_from(v).map_err(|_| {
                ScorerError::Config(format!("weight '{}' is too large, got {}", name, v))
            }),
            Some(v) => Err(ScorerError::Config(format!(
                "weight '{}' must be non-negative, got {}",
                name, v
            ))),
            None => Err(ScorerError::Config(format!(
                "weight '{}' must be an integer",
                name
            ))),
        }
    }

    /// Smallest possible distance given only the two lengths.
    ///
    /// Saturates at `usize::MAX`, which is also the pruned sentinel.
    pub fn lower_bound(&self, needle_len: usize, haystack_len: usize) -> usize {
        if haystack_len >= needle_len {
            (haystack_len - needle_len).saturating_mul(self.insertion)
        } else {
            (needle_len - haystack_len).saturating_mul(self.deletion)
        }
    }

    pub fn distance(&self, needle: &[u64], haystack: &[u64], cutoff: usize) -> usize {
        if self.lower_bound(needle.len(), haystack.len()) > cutoff {
            return usize::MAX;
        }
        let dist = weighted_levenshtein(
            needle,
            haystack,
            self.insertion,
            self.deletion,
            self.substitution,
        );
        if dist <= cutoff {
            dist
        } else {
            usize::MAX
        }
    }
}

impl From<LevenshteinWeights> for ParamSet {
    fn from(w: LevenshteinWeights) -> Self {
        ParamSet::new().with(
            "weights",
            ParamValue::List(vec![
                ParamValue::Int(w.insertion as i64),
                ParamValue::Int(w.deletion as i64),
                ParamValue::Int(w.substitution as i64),
            ]),
        )
    }
}

/// The Levenshtein descriptor (version 3).
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

struct LevenshteinComparator {
    weights: LevenshteinWeights,
    needles: Vec<Vec<u64>>,
    haystack: Vec<u64>,
}

impl PairComparator<usize> for LevenshteinComparator {
    fn needle_count(&self) -> usize {
        self.needles.len()
    }

    fn compare(
        &mut self,
        needle: usize,
        haystack: &StringView,
        cutoff: usize,
        _hint: Option<usize>,
    ) -> Result<usize> {
        let needle = self.needles.get(needle).ok_or_else(|| {
            ScorerError::Construction(format!("needle index {} out of range", needle))
        })?;
        self.haystack.clear();
        self.haystack.extend(haystack.code_points());
        Ok(self.weights.distance(needle, &self.haystack, cutoff))
    }
}

impl ScorerDescriptor for Levenshtein {
    fn name(&self) -> &str {
        "levenshtein"
    }

    fn init_kwargs(&self, params: &ParamSet) -> Result<KwargsContext> {
        Ok(KwargsContext::new(LevenshteinWeights::from_params(params)?))
    }

    fn scorer_flags(&self, kwargs: &KwargsContext) -> Result<ScorerFlags> {
        let weights = kwargs.downcast::<LevenshteinWeights>()?;
        let mut bits = FlagBits::MULTI_STRING_INIT | FlagBits::MULTI_STRING_CALL;
        if weights.insertion == weights.deletion {
            bits |= FlagBits::TRIANGLE_INEQUALITY;
        }
        ScorerFlags::for_domain(bits, 0usize, usize::MAX)
    }

    fn init_func(
        &self,
        kwargs: &KwargsContext,
        needles: &[&StringView],
    ) -> Result<Box<dyn ScorerFunc>> {
        let weights = *kwargs.downcast::<LevenshteinWeights>()?;
        let comparator = LevenshteinComparator {
            weights,
            needles: needles.iter().map(|n| n.to_code_points()).collect(),
            haystack: Vec::new(),
        };
        Ok(PairwiseFunc::boxed(comparator, true))
    }

    fn uncached(
        &self,
        s1: &StringView,
        s2: &StringView,
        kwargs: &KwargsContext,
        cutoff: Score,
        _hint: Option<Score>,
    ) -> Result<Score> {
        let weights = kwargs.downcast::<LevenshteinWeights>()?;
        let cutoff = cutoff.as_usize().ok_or_else(|| {
            ScorerError::Construction(format!("levenshtein cutoff {} is not size_t", cutoff))
        })?;
        let dist = weights.distance(&s1.to_code_points(), &s2.to_code_points(), cutoff);
        Ok(Score::SizeT(dist))
    }
}
