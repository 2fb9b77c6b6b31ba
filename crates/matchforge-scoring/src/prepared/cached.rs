use std::fmt;
use std::slice;

use tracing::trace;

use matchforge_core::{
    ResultDomain, Result, Score, ScoreBuffer, ScorerError, ScorerFlags, ScoresMut, StringView,
};

use super::{resolve_cutoff, resolve_hint, PreparedScorer};
use crate::func::ScorerFunc;

/// A cached instance together with the flags it was validated against.
///
/// Dropping it releases the instance before the shared kwargs context.
pub struct CachedScorer {
    func: Box<dyn ScorerFunc>,
    prepared: PreparedScorer,
}

impl CachedScorer {
    pub(super) fn new(func: Box<dyn ScorerFunc>, prepared: PreparedScorer) -> Self {
        Self { func, prepared }
    }

    pub fn name(&self) -> &str {
        self.prepared.name()
    }

    pub fn flags(&self) -> &ScorerFlags {
        self.prepared.flags()
    }

    pub fn domain(&self) -> ResultDomain {
        self.func.domain()
    }

    pub fn needle_count(&self) -> usize {
        self.func.needle_count()
    }

    /// Scores `haystacks` into `results`.
    ///
    /// `results` must hold `haystacks.len() * needle_count()` slots of the
    /// scorer's domain, filled haystack-major.
    ///
    /// # Errors
    ///
    /// [`ScorerError::Construction`] for an empty batch, a batch without
    /// `MULTI_STRING_CALL`, or a result buffer of the wrong domain or size.
    /// On error the contents of `results` are unspecified.
    pub fn call(
        &mut self,
        haystacks: &[&StringView],
        cutoff: Option<Score>,
        hint: Option<Score>,
        results: ScoresMut<'_>,
    ) -> Result<()> {
        let flags = self.prepared.flags();
        if haystacks.is_empty() {
            return Err(ScorerError::Construction(format!(
                "scorer '{}' called without haystacks",
                self.name()
            )));
        }
        if haystacks.len() > 1 && !flags.supports_multi_string_call() {
            return Err(ScorerError::Construction(format!(
                "scorer '{}' does not support MULTI_STRING_CALL ({} haystacks passed)",
                self.name(),
                haystacks.len()
            )));
        }
        if results.domain() != flags.domain() {
            return Err(ScorerError::Construction(format!(
                "{} result buffer passed to {} scorer '{}'",
                results.domain(),
                flags.domain(),
                self.name()
            )));
        }
        let expected = haystacks.len() * self.needle_count();
        if results.len() != expected {
            return Err(ScorerError::Construction(format!(
                "result buffer holds {} slots, expected {}",
                results.len(),
                expected
            )));
        }

        let cutoff = resolve_cutoff(flags, cutoff)?;
        let hint = resolve_hint(self.prepared.scorer(), flags, hint)?;
        self.func.call(haystacks, cutoff, hint, results)
    }

    /// Scores any number of haystacks into a fresh buffer.
    ///
    /// Without `MULTI_STRING_CALL` the batch is split into single-haystack
    /// calls, so the caller never has to check the flag.
    pub fn score_many(
        &mut self,
        haystacks: &[&StringView],
        cutoff: Option<Score>,
        hint: Option<Score>,
    ) -> Result<ScoreBuffer> {
        let width = self.needle_count();
        let mut buffer = ScoreBuffer::new(self.domain(), haystacks.len() * width);

        if haystacks.len() <= 1 || self.flags().supports_multi_string_call() {
            self.call(haystacks, cutoff, hint, buffer.as_scores_mut())?;
            return Ok(buffer);
        }

        trace!(
            event = "batch_split",
            scorer = self.name(),
            haystacks = haystacks.len(),
        );
        let mut out = buffer.as_scores_mut();
        for (i, haystack) in haystacks.iter().enumerate() {
            let slot = out.range_mut(i * width..(i + 1) * width).ok_or_else(|| {
                ScorerError::Construction(format!("result slot {} out of range", i))
            })?;
            self.call(slice::from_ref(haystack), cutoff, hint, slot)?;
        }
        Ok(buffer)
    }

    /// Scores a single haystack against a single-needle instance.
    pub fn score_one(
        &mut self,
        haystack: &StringView,
        cutoff: Option<Score>,
        hint: Option<Score>,
    ) -> Result<Score> {
        if self.needle_count() != 1 {
            return Err(ScorerError::Construction(format!(
                "score_one on an instance bound to {} needles",
                self.needle_count()
            )));
        }
        let buffer = self.score_many(&[haystack], cutoff, hint)?;
        buffer
            .get(0)
            .ok_or_else(|| ScorerError::Construction("empty result buffer".to_string()))
    }
}

impl fmt::Debug for CachedScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedScorer")
            .field("name", &self.name())
            .field("domain", &self.domain())
            .field("needle_count", &self.needle_count())
            .finish()
    }
}
