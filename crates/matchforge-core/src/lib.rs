//! MatchForge Core - Core types and traits for the scorer ABI
//!
//! This crate provides the fundamental abstractions shared by scorer
//! plugins and the hosts that drive them:
//! - String views with a fixed code-unit width and explicit release
//! - Preprocessors that canonicalize host values
//! - Keyword-argument contexts and parameter sets
//! - Result domains, tagged scores and result buffers
//! - Scorer flags and ABI version negotiation

pub mod error;
pub mod flags;
pub mod kwargs;
pub mod preprocess;
pub mod release;
pub mod score;
pub mod string;
pub mod version;

pub use error::{Result, ScorerError};
pub use flags::{FlagBits, ScorerFlags};
pub use kwargs::{KwargsContext, ParamSet, ParamValue};
pub use preprocess::{DefaultProcess, FnPreprocessor, Identity, Preprocessor};
pub use release::ReleaseHook;
pub use score::{ResultDomain, Score, ScoreBuffer, ScoreType, ScoresMut};
pub use string::{CharKind, CodeUnits, HostValue, IntoStringView, StringView};
pub use version::{AbiCapabilities, AbiVersion};
