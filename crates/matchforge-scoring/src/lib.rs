//! Scorer descriptors and host-side dispatch.
//!
//! The plugin side of the contract is two traits:
//! - [`ScorerDescriptor`]: the registration record (kwargs constructor,
//!   flags query, cached-instance constructor, uncached call)
//! - [`ScorerFunc`]: a cached instance bound to one or more needles
//!
//! The host side negotiates the descriptor version once
//! ([`RegisteredScorer`]), resolves kwargs and flags once per parameter set
//! ([`PreparedScorer`]) and validates every call against them
//! ([`CachedScorer`], [`TypedScorer`]).

pub mod descriptor;
pub mod func;
pub mod parallel;
pub mod prepared;
pub mod registry;
pub mod typed;

#[cfg(test)]
pub(crate) mod test_utils;

pub use descriptor::ScorerDescriptor;
pub use func::{PairComparator, PairwiseFunc, ScorerFunc};
pub use parallel::score_parallel;
pub use prepared::{CachedScorer, PreparedScorer};
pub use registry::{RegisteredScorer, ScorerRegistry};
pub use typed::{TypedCachedScorer, TypedScorer};
