//! Host-side dispatch over a negotiated scorer.
//!
//! [`PreparedScorer`] binds a registered descriptor to one parameter set:
//! kwargs are initialized and flags queried exactly once, then every call is
//! validated against those flags and the negotiated capabilities before it
//! reaches the plugin.

mod cached;

#[cfg(test)]
mod tests;

use std::fmt;

use tracing::{debug, trace};

use matchforge_core::preprocess::{check_preprocessor, preprocess_value};
use matchforge_core::{
    HostValue, KwargsContext, ParamSet, Preprocessor, Result, Score, ScoreType, ScorerError,
    ScorerFlags, StringView,
};

pub use cached::CachedScorer;

use crate::registry::RegisteredScorer;
use crate::typed::TypedScorer;

/// A scorer with kwargs initialized and flags resolved.
///
/// Cloning is cheap: the kwargs context is shared, so clones and every
/// [`CachedScorer`] built from them keep it alive until the last one drops.
#[derive(Clone)]
pub struct PreparedScorer {
    scorer: RegisteredScorer,
    kwargs: KwargsContext,
    flags: ScorerFlags,
}

impl PreparedScorer {
    /// Initializes kwargs for `params` and queries the flags.
    ///
    /// # Errors
    ///
    /// [`ScorerError::Config`] from kwargs initialization, or
    /// [`ScorerError::Construction`] when the flags are inconsistent.
    pub fn new(scorer: RegisteredScorer, params: &ParamSet) -> Result<Self> {
        let kwargs = scorer.descriptor().init_kwargs(params)?;
        let flags = scorer.descriptor().scorer_flags(&kwargs)?;
        debug!(
            event = "scorer_prepared",
            scorer = scorer.name(),
            params = params.len(),
            domain = %flags.domain(),
            flags = ?flags.bits(),
        );
        Ok(Self {
            scorer,
            kwargs,
            flags,
        })
    }

    pub fn name(&self) -> &str {
        self.scorer.name()
    }

    pub fn scorer(&self) -> &RegisteredScorer {
        &self.scorer
    }

    pub fn kwargs(&self) -> &KwargsContext {
        &self.kwargs
    }

    pub fn flags(&self) -> &ScorerFlags {
        &self.flags
    }

    /// Resolves an optional cutoff: `None` becomes the worst score, which
    /// every result satisfies.
    pub fn resolve_cutoff(&self, cutoff: Option<Score>) -> Result<Score> {
        resolve_cutoff(&self.flags, cutoff)
    }

    /// Validates a hint and drops it when the scorer cannot receive one.
    pub fn resolve_hint(&self, hint: Option<Score>) -> Result<Option<Score>> {
        resolve_hint(&self.scorer, &self.flags, hint)
    }

    /// Builds a cached instance bound to `needles`.
    ///
    /// # Errors
    ///
    /// [`ScorerError::Construction`] for an empty needle list, several
    /// needles without `MULTI_STRING_INIT`, or an instance that disagrees
    /// with the flags about its domain or needle count.
    pub fn cached(&self, needles: &[&StringView]) -> Result<CachedScorer> {
        if needles.is_empty() {
            return Err(ScorerError::Construction(format!(
                "scorer '{}' needs at least one needle",
                self.name()
            )));
        }
        if needles.len() > 1 && !self.flags.supports_multi_string_init() {
            return Err(ScorerError::Construction(format!(
                "scorer '{}' does not support MULTI_STRING_INIT ({} needles passed)",
                self.name(),
                needles.len()
            )));
        }

        let func = self.scorer.descriptor().init_func(&self.kwargs, needles)?;
        if func.domain() != self.flags.domain() {
            return Err(ScorerError::Construction(format!(
                "scorer '{}' built a {} instance but its flags declare {}",
                self.name(),
                func.domain(),
                self.flags.domain()
            )));
        }
        if func.needle_count() != needles.len() {
            return Err(ScorerError::Construction(format!(
                "scorer '{}' bound {} needles, expected {}",
                self.name(),
                func.needle_count(),
                needles.len()
            )));
        }
        Ok(CachedScorer::new(func, self.clone()))
    }

    /// Scores one pair.
    ///
    /// Uses the uncached callable when the descriptor negotiated it, and a
    /// temporary cached instance otherwise.
    pub fn score(
        &self,
        s1: &StringView,
        s2: &StringView,
        cutoff: Option<Score>,
        hint: Option<Score>,
    ) -> Result<Score> {
        let cutoff = self.resolve_cutoff(cutoff)?;
        let hint = self.resolve_hint(hint)?;

        if self.scorer.capabilities().uncached_call {
            let score = self
                .scorer
                .descriptor()
                .uncached(s1, s2, &self.kwargs, cutoff, hint)?;
            score.ensure_domain(self.flags.domain())?;
            return Ok(score);
        }

        trace!(
            event = "uncached_fallback",
            scorer = self.name(),
            version = self.scorer.version().raw(),
        );
        self.cached(&[s1])?.score_one(s2, Some(cutoff), hint)
    }

    /// Scores two host values, preprocessing them first when `preprocessor`
    /// is given.
    ///
    /// A `None` value yields the worst score when the scorer sets
    /// `NONE_IS_WORST_SCORE` and fails with [`ScorerError::Conversion`]
    /// otherwise.
    pub fn score_values(
        &self,
        v1: &HostValue,
        v2: &HostValue,
        preprocessor: Option<&dyn Preprocessor>,
        cutoff: Option<Score>,
        hint: Option<Score>,
    ) -> Result<Score> {
        if let Some(p) = preprocessor {
            check_preprocessor(p)?;
        }
        let cutoff = self.resolve_cutoff(cutoff)?;

        if v1.is_none() || v2.is_none() {
            if self.flags.none_is_worst_score() {
                trace!(event = "none_is_worst", scorer = self.name());
                return Ok(self.flags.worst_score());
            }
            return Err(ScorerError::Conversion(format!(
                "scorer '{}' cannot compare a none value",
                self.name()
            )));
        }

        let s1 = preprocess_value(preprocessor, v1)?;
        let s2 = preprocess_value(preprocessor, v2)?;
        self.score(&s1, &s2, Some(cutoff), hint)
    }

    /// Fixes the result domain to `T`.
    ///
    /// # Errors
    ///
    /// [`ScorerError::Construction`] if the flags select another domain.
    pub fn typed<T: ScoreType>(&self) -> Result<TypedScorer<T>> {
        TypedScorer::new(self.clone())
    }
}

impl fmt::Debug for PreparedScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedScorer")
            .field("scorer", &self.scorer)
            .field("flags", &self.flags)
            .finish()
    }
}

pub(crate) fn resolve_cutoff(flags: &ScorerFlags, cutoff: Option<Score>) -> Result<Score> {
    match cutoff {
        Some(cutoff) => {
            cutoff.ensure_domain(flags.domain())?;
            Ok(cutoff)
        }
        None => Ok(flags.default_cutoff()),
    }
}

pub(crate) fn resolve_hint(
    scorer: &RegisteredScorer,
    flags: &ScorerFlags,
    hint: Option<Score>,
) -> Result<Option<Score>> {
    let Some(hint) = hint else {
        return Ok(None);
    };
    hint.ensure_domain(flags.domain())?;
    if !scorer.capabilities().score_hint {
        trace!(
            event = "score_hint_dropped",
            scorer = scorer.name(),
            version = scorer.version().raw(),
        );
        return Ok(None);
    }
    Ok(Some(hint))
}
