//! The scorer registration record.

use matchforge_core::version::SCORER_ABI_VERSION;
use matchforge_core::{KwargsContext, ParamSet, Result, Score, ScorerError, ScorerFlags, StringView};

use crate::func::ScorerFunc;

/// Capability table a scorer plugin registers with the host.
///
/// Implementations must be stateless apart from immutable configuration:
/// every per-parameter-set value belongs in the [`KwargsContext`] returned by
/// [`init_kwargs`](Self::init_kwargs), and every per-needle value in the
/// [`ScorerFunc`] returned by [`init_func`](Self::init_func).
///
/// The host reads [`version`](Self::version) before anything else and never
/// touches a method introduced by a later revision on an older descriptor:
/// score hints need version 2, [`uncached`](Self::uncached) needs version 3.
pub trait ScorerDescriptor: Send + Sync {
    /// Registration name.
    fn name(&self) -> &str;

    /// Descriptor struct version.
    fn version(&self) -> u32 {
        SCORER_ABI_VERSION
    }

    /// Validates `params` and captures them in an opaque context.
    ///
    /// # Errors
    ///
    /// [`ScorerError::Config`] on invalid or contradictory parameters.
    fn init_kwargs(&self, params: &ParamSet) -> Result<KwargsContext>;

    /// Static metadata for the given configuration.
    fn scorer_flags(&self, kwargs: &KwargsContext) -> Result<ScorerFlags>;

    /// Builds a cached instance bound to `needles`.
    ///
    /// More than one needle is only passed when the flags advertise
    /// `MULTI_STRING_INIT`.
    ///
    /// # Errors
    ///
    /// [`ScorerError::Construction`] on malformed needles or an unsupported
    /// needle count.
    fn init_func(
        &self,
        kwargs: &KwargsContext,
        needles: &[&StringView],
    ) -> Result<Box<dyn ScorerFunc>>;

    /// Compares a single pair without building a cached instance.
    ///
    /// Only invoked on version 3 descriptors. Cutoff and hint follow the same
    /// rules as [`ScorerFunc::call`].
    fn uncached(
        &self,
        s1: &StringView,
        s2: &StringView,
        kwargs: &KwargsContext,
        cutoff: Score,
        hint: Option<Score>,
    ) -> Result<Score> {
        let _ = (s1, s2, kwargs, cutoff, hint);
        Err(ScorerError::Construction(format!(
            "scorer '{}' does not provide an uncached call",
            self.name()
        )))
    }
}
