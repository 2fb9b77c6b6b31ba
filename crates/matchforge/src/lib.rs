//! MatchForge - A Pluggable Scorer ABI for Fuzzy String Matching
//!
//! Register scorers, describe profiles in TOML or YAML, and score host
//! values through one validated entry point.
//!
//! # Example
//!
//! ```rust
//! use matchforge::prelude::*;
//!
//! let flags = ScorerFlags::for_domain(FlagBits::SYMMETRIC, 100.0f64, 0.0f64).unwrap();
//! assert!(flags.higher_is_better());
//! assert_eq!(flags.default_cutoff(), Score::F64(0.0));
//! ```

// Core contract types
pub use matchforge_core::{
    AbiCapabilities, AbiVersion, CharKind, DefaultProcess, FlagBits, HostValue, Identity,
    KwargsContext, ParamSet, ParamValue, Preprocessor, ReleaseHook, ResultDomain, Score,
    ScoreBuffer, ScoreType, ScorerError, ScorerFlags, ScoresMut, StringView,
};

// Descriptor traits and host dispatch
pub use matchforge_scoring::{
    score_parallel, CachedScorer, PairComparator, PairwiseFunc, PreparedScorer,
    RegisteredScorer, ScorerDescriptor, ScorerFunc, ScorerRegistry, TypedCachedScorer,
    TypedScorer,
};

// Configuration
pub use matchforge_config::{ConfigError, MatchConfig, PreprocessMode, ProfileConfig};

pub mod console;
mod engine;

pub use engine::{Engine, EngineError, Profile};

pub mod prelude {
    pub use super::{
        Engine, EngineError, FlagBits, HostValue, KwargsContext, MatchConfig, PairComparator,
        PairwiseFunc, ParamSet, PreparedScorer, Profile, ProfileConfig, ResultDomain, Score,
        ScorerDescriptor, ScorerError, ScorerFlags, ScorerFunc, ScorerRegistry, StringView,
    };
}
