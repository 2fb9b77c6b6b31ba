//! ABI versions and capability negotiation.
//!
//! Every descriptor reports the struct version it was built against. The
//! host resolves that number once, at registration, into an
//! [`AbiCapabilities`] set and consults only the capability set afterwards,
//! so a field introduced by a later revision is never touched on an older
//! descriptor.
//!
//! | Version | Adds                                              |
//! |---------|---------------------------------------------------|
//! | 1       | kwargs init, flags query, cached instances        |
//! | 2       | score hints forwarded to calls                    |
//! | 3       | uncached single-pair callable                     |

use std::fmt;

use crate::error::{Result, ScorerError};

/// Scorer descriptor version implemented by this crate.
pub const SCORER_ABI_VERSION: u32 = 3;

/// Oldest scorer descriptor version still accepted.
pub const MIN_SCORER_ABI_VERSION: u32 = 1;

/// Preprocessor struct version implemented by this crate.
pub const PREPROCESSOR_VERSION: u32 = 1;

/// A known scorer descriptor version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AbiVersion {
    V1 = 1,
    V2 = 2,
    V3 = 3,
}

impl AbiVersion {
    /// The version implemented by this crate.
    pub const CURRENT: AbiVersion = AbiVersion::V3;

    /// Resolves a raw version number.
    ///
    /// # Errors
    ///
    /// Unknown versions, including future ones, are rejected with
    /// [`ScorerError::UnsupportedVersion`] rather than guessed at.
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            1 => Ok(AbiVersion::V1),
            2 => Ok(AbiVersion::V2),
            3 => Ok(AbiVersion::V3),
            found => Err(ScorerError::UnsupportedVersion {
                found,
                min: MIN_SCORER_ABI_VERSION,
                max: SCORER_ABI_VERSION,
            }),
        }
    }

    /// Raw version number.
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Capabilities available at this version.
    pub const fn capabilities(self) -> AbiCapabilities {
        AbiCapabilities {
            score_hint: self.raw() >= 2,
            uncached_call: self.raw() >= 3,
        }
    }
}

impl fmt::Display for AbiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.raw())
    }
}

/// Optional parts of the contract a descriptor may be asked to honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AbiCapabilities {
    /// Calls may receive a score hint.
    pub score_hint: bool,
    /// The uncached single-pair callable may be invoked.
    pub uncached_call: bool,
}
