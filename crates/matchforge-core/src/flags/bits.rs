//! Raw flag bits.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::score::ResultDomain;

/// Capability and property bits of a scorer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlagBits(u32);

impl FlagBits {
    /// Instance construction may bind more than one needle.
    pub const MULTI_STRING_INIT: FlagBits = FlagBits(1 << 0);
    /// A single call may process more than one haystack.
    pub const MULTI_STRING_CALL: FlagBits = FlagBits(1 << 1);
    /// Results are `f64`.
    pub const RESULT_F64: FlagBits = FlagBits(1 << 5);
    /// Results are `i64`.
    pub const RESULT_I64: FlagBits = FlagBits(1 << 6);
    /// Results are `usize`.
    pub const RESULT_SIZE_T: FlagBits = FlagBits(1 << 7);
    /// `scorer(a, b) == scorer(b, a)`.
    pub const SYMMETRIC: FlagBits = FlagBits(1 << 11);
    /// `scorer(a, b) <= scorer(a, c) + scorer(c, b)`; includes `SYMMETRIC`.
    pub const TRIANGLE_INEQUALITY: FlagBits = FlagBits(1 << 12 | 1 << 11);
    /// A `None` input yields the worst score.
    pub const NONE_IS_WORST_SCORE: FlagBits = FlagBits(1 << 13);

    pub(crate) const TRIANGLE_ONLY: FlagBits = FlagBits(1 << 12);

    const DOMAIN_MASK: u32 = (1 << 5) | (1 << 6) | (1 << 7);
    const KNOWN_MASK: u32 =
        (1 << 0) | (1 << 1) | Self::DOMAIN_MASK | (1 << 11) | (1 << 12) | (1 << 13);

    /// No bits set.
    pub const fn empty() -> Self {
        FlagBits(0)
    }

    /// Wraps raw bits as received from a descriptor.
    pub const fn from_bits(bits: u32) -> Self {
        FlagBits(bits)
    }

    /// Raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every bit of `other` is set.
    pub const fn contains(self, other: FlagBits) -> bool {
        self.0 & other.0 == other.0
    }

    /// `self` with every bit of `other` cleared.
    pub const fn without(self, other: FlagBits) -> Self {
        FlagBits(self.0 & !other.0)
    }

    /// Domain bit for `domain`.
    pub const fn for_result(domain: ResultDomain) -> Self {
        match domain {
            ResultDomain::F64 => Self::RESULT_F64,
            ResultDomain::I64 => Self::RESULT_I64,
            ResultDomain::SizeT => Self::RESULT_SIZE_T,
        }
    }

    /// The selected domain, if exactly one domain bit is set.
    pub fn domain(self) -> Option<ResultDomain> {
        match self.0 & Self::DOMAIN_MASK {
            b if b == Self::RESULT_F64.0 => Some(ResultDomain::F64),
            b if b == Self::RESULT_I64.0 => Some(ResultDomain::I64),
            b if b == Self::RESULT_SIZE_T.0 => Some(ResultDomain::SizeT),
            _ => None,
        }
    }

    pub(crate) fn unknown_bits(self) -> u32 {
        self.0 & !Self::KNOWN_MASK
    }
}

impl BitOr for FlagBits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        FlagBits(self.0 | rhs.0)
    }
}

impl BitOrAssign for FlagBits {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for FlagBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(FlagBits, &str); 8] = [
            (FlagBits::MULTI_STRING_INIT, "MULTI_STRING_INIT"),
            (FlagBits::MULTI_STRING_CALL, "MULTI_STRING_CALL"),
            (FlagBits::RESULT_F64, "RESULT_F64"),
            (FlagBits::RESULT_I64, "RESULT_I64"),
            (FlagBits::RESULT_SIZE_T, "RESULT_SIZE_T"),
            (FlagBits::SYMMETRIC, "SYMMETRIC"),
            (FlagBits::TRIANGLE_ONLY, "TRIANGLE_INEQUALITY"),
            (FlagBits::NONE_IS_WORST_SCORE, "NONE_IS_WORST_SCORE"),
        ];
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "FlagBits({})", names.join(" | "))
    }
}
