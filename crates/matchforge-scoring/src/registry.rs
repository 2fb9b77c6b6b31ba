//! Version negotiation and scorer lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use matchforge_core::{AbiCapabilities, AbiVersion, ParamSet, Result, ScorerError};

use crate::descriptor::ScorerDescriptor;
use crate::prepared::PreparedScorer;

/// A descriptor whose version has been negotiated.
///
/// Negotiation happens exactly once, here; everything downstream consults
/// [`capabilities`](Self::capabilities) instead of the raw version.
#[derive(Clone)]
pub struct RegisteredScorer {
    descriptor: Arc<dyn ScorerDescriptor>,
    version: AbiVersion,
    capabilities: AbiCapabilities,
}

impl RegisteredScorer {
    /// Negotiates the descriptor's version.
    ///
    /// # Errors
    ///
    /// [`ScorerError::UnsupportedVersion`] when the descriptor reports a
    /// version outside the supported range.
    pub fn negotiate(descriptor: Arc<dyn ScorerDescriptor>) -> Result<Self> {
        let raw = descriptor.version();
        let version = match AbiVersion::from_raw(raw) {
            Ok(version) => version,
            Err(err) => {
                warn!(
                    event = "scorer_rejected",
                    scorer = descriptor.name(),
                    version = raw,
                    error = %err,
                );
                return Err(err);
            }
        };
        let capabilities = version.capabilities();
        info!(
            event = "scorer_registered",
            scorer = descriptor.name(),
            version = version.raw(),
            score_hint = capabilities.score_hint,
            uncached_call = capabilities.uncached_call,
        );
        Ok(Self {
            descriptor,
            version,
            capabilities,
        })
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn version(&self) -> AbiVersion {
        self.version
    }

    pub fn capabilities(&self) -> AbiCapabilities {
        self.capabilities
    }

    pub fn descriptor(&self) -> &dyn ScorerDescriptor {
        self.descriptor.as_ref()
    }

    /// Builds the kwargs context for `params` and queries the flags.
    pub fn prepare(&self, params: &ParamSet) -> Result<PreparedScorer> {
        PreparedScorer::new(self.clone(), params)
    }
}

impl fmt::Debug for RegisteredScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredScorer")
            .field("name", &self.name())
            .field("version", &self.version)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// Named collection of negotiated scorers.
///
/// # Examples
///
/// ```
/// use matchforge_core::{
///     FlagBits, KwargsContext, ParamSet, Result, Score, ScorerFlags, StringView,
/// };
/// use matchforge_scoring::{
///     PairComparator, PairwiseFunc, ScorerDescriptor, ScorerFunc, ScorerRegistry,
/// };
///
/// struct LengthGap(Vec<StringView>);
///
/// impl PairComparator<usize> for LengthGap {
///     fn needle_count(&self) -> usize {
///         self.0.len()
///     }
///
///     fn compare(
///         &mut self,
///         needle: usize,
///         haystack: &StringView,
///         cutoff: usize,
///         _hint: Option<usize>,
///     ) -> Result<usize> {
///         let gap = self.0[needle].len().abs_diff(haystack.len());
///         Ok(if gap <= cutoff { gap } else { usize::MAX })
///     }
/// }
///
/// struct LengthGapScorer;
///
/// impl ScorerDescriptor for LengthGapScorer {
///     fn name(&self) -> &str {
///         "length_gap"
///     }
///
///     fn init_kwargs(&self, params: &ParamSet) -> Result<KwargsContext> {
///         params.ensure_known(&[])?;
///         Ok(KwargsContext::empty())
///     }
///
///     fn scorer_flags(&self, _kwargs: &KwargsContext) -> Result<ScorerFlags> {
///         ScorerFlags::for_domain(FlagBits::SYMMETRIC, 0usize, usize::MAX)
///     }
///
///     fn init_func(
///         &self,
///         _kwargs: &KwargsContext,
///         needles: &[&StringView],
///     ) -> Result<Box<dyn ScorerFunc>> {
///         let needles = needles.iter().map(|n| (*n).clone()).collect();
///         Ok(PairwiseFunc::boxed(LengthGap(needles), false))
///     }
/// }
///
/// let mut registry = ScorerRegistry::new();
/// registry.register(LengthGapScorer)?;
/// assert!(registry.register(LengthGapScorer).is_err());
///
/// let prepared = registry.prepare("length_gap", &ParamSet::new())?;
/// let mut cached = prepared.cached(&[&StringView::from("kitten")])?;
/// let score = cached.score_one(&StringView::from("kit"), None, None)?;
/// assert_eq!(score, Score::SizeT(3));
/// # Ok::<(), matchforge_core::ScorerError>(())
/// ```
#[derive(Debug, Default)]
pub struct ScorerRegistry {
    scorers: HashMap<String, RegisteredScorer>,
}

impl ScorerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negotiates and registers `descriptor` under its own name.
    pub fn register<D>(&mut self, descriptor: D) -> Result<&RegisteredScorer>
    where
        D: ScorerDescriptor + 'static,
    {
        self.register_arc(Arc::new(descriptor))
    }

    /// Like [`register`](Self::register) for an already shared descriptor.
    ///
    /// # Errors
    ///
    /// [`ScorerError::UnsupportedVersion`] from negotiation, or
    /// [`ScorerError::Config`] if the name is taken.
    pub fn register_arc(
        &mut self,
        descriptor: Arc<dyn ScorerDescriptor>,
    ) -> Result<&RegisteredScorer> {
        let name = descriptor.name().to_string();
        if self.scorers.contains_key(&name) {
            return Err(ScorerError::Config(format!(
                "scorer '{}' is already registered",
                name
            )));
        }
        let registered = RegisteredScorer::negotiate(descriptor)?;
        Ok(self.scorers.entry(name).or_insert(registered))
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredScorer> {
        self.scorers.get(name)
    }

    /// Looks up a scorer, failing with [`ScorerError::Config`] when unknown.
    pub fn require(&self, name: &str) -> Result<&RegisteredScorer> {
        self.get(name).ok_or_else(|| {
            ScorerError::Config(format!(
                "unknown scorer '{}' (registered: {})",
                name,
                self.names().join(", ")
            ))
        })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scorers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.scorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scorers.is_empty()
    }

    /// Shorthand for `require(name)?.prepare(params)`.
    pub fn prepare(&self, name: &str, params: &ParamSet) -> Result<PreparedScorer> {
        self.require(name)?.prepare(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StubDescriptor;

    #[test]
    fn test_negotiates_capabilities() {
        let v1 = RegisteredScorer::negotiate(StubDescriptor::new(1)).unwrap();
        assert_eq!(v1.version(), AbiVersion::V1);
        assert!(!v1.capabilities().score_hint);
        assert!(!v1.capabilities().uncached_call);

        let v3 = RegisteredScorer::negotiate(StubDescriptor::new(3)).unwrap();
        assert!(v3.capabilities().score_hint);
        assert!(v3.capabilities().uncached_call);
    }

    #[test]
    fn test_rejects_unknown_versions() {
        for version in [0, 4, 99] {
            let err = RegisteredScorer::negotiate(StubDescriptor::new(version)).unwrap_err();
            assert!(matches!(err, ScorerError::UnsupportedVersion { found, .. } if found == version));
        }
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = ScorerRegistry::new();
        assert!(registry.is_empty());
        registry.register_arc(StubDescriptor::new(3)).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names(), vec!["length_diff"]);
        assert!(registry.get("length_diff").is_some());

        let err = registry.require("nope").unwrap_err();
        assert!(matches!(err, ScorerError::Config(msg) if msg.contains("length_diff")));
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = ScorerRegistry::new();
        registry.register_arc(StubDescriptor::new(3)).unwrap();
        let err = registry.register_arc(StubDescriptor::new(2)).unwrap_err();
        assert!(matches!(err, ScorerError::Config(_)));
        assert_eq!(registry.get("length_diff").unwrap().version(), AbiVersion::V3);
    }

    #[test]
    fn test_rejected_version_is_not_registered() {
        let mut registry = ScorerRegistry::new();
        assert!(registry.register_arc(StubDescriptor::new(7)).is_err());
        assert!(registry.is_empty());
    }
}
