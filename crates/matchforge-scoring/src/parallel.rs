//! Parallel batch scoring with one cached instance per worker.

use rayon::prelude::*;
use smallvec::SmallVec;
use tracing::debug;

use matchforge_core::{Result, ScoreType, ScorerError, StringView};

use crate::typed::TypedScorer;

/// Scores `needle` against every haystack in parallel.
///
/// Haystacks are split into chunks of `chunk_size`. Each rayon worker builds
/// its own cached instance the first time it picks up a chunk and reuses it
/// for every later chunk; instances are never shared between threads. Each
/// chunk writes into its own disjoint slice of the result vector, and a
/// failure in any chunk fails the whole batch.
///
/// # Errors
///
/// [`ScorerError::Construction`] when `chunk_size` is zero, plus anything
/// instance construction or a call reports.
pub fn score_parallel<T: ScoreType>(
    scorer: &TypedScorer<T>,
    needle: &StringView,
    haystacks: &[StringView],
    cutoff: Option<T>,
    hint: Option<T>,
    chunk_size: usize,
) -> Result<Vec<T>> {
    if chunk_size == 0 {
        return Err(ScorerError::Construction(
            "parallel chunk size must be positive".to_string(),
        ));
    }
    let mut results = vec![scorer.worst(); haystacks.len()];
    if haystacks.is_empty() {
        return Ok(results);
    }

    debug!(
        event = "parallel_batch",
        scorer = scorer.name(),
        haystacks = haystacks.len(),
        chunk_size = chunk_size,
        threads = rayon::current_num_threads(),
    );

    results
        .par_chunks_mut(chunk_size)
        .zip(haystacks.par_chunks(chunk_size))
        .try_for_each_init(
            || scorer.cached(&[needle]),
            |cached, (out, chunk)| {
                let cached = cached.as_mut().map_err(|err| err.clone())?;
                let refs: SmallVec<[&StringView; 16]> = chunk.iter().collect();
                cached.score_into(&refs, cutoff, hint, out)
            },
        )?;

    Ok(results)
}
