//! Code-unit width classification.

use std::fmt;

/// Width of the code units backing a [`StringView`](super::StringView).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharKind {
    /// 8-bit code units
    U8,
    /// 16-bit code units
    U16,
    /// 32-bit code units
    U32,
    /// 64-bit code units
    U64,
}

impl CharKind {
    /// All kinds, narrowest first.
    pub const ALL: [CharKind; 4] = [CharKind::U8, CharKind::U16, CharKind::U32, CharKind::U64];

    /// Number of bits per code unit.
    pub const fn bits(self) -> u32 {
        match self {
            CharKind::U8 => 8,
            CharKind::U16 => 16,
            CharKind::U32 => 32,
            CharKind::U64 => 64,
        }
    }

    /// Largest code point representable by this kind.
    pub const fn max_code_point(self) -> u64 {
        match self {
            CharKind::U8 => u8::MAX as u64,
            CharKind::U16 => u16::MAX as u64,
            CharKind::U32 => u32::MAX as u64,
            CharKind::U64 => u64::MAX,
        }
    }

    /// Returns the narrowest kind able to hold `code_point`.
    pub const fn narrowest_for(code_point: u64) -> Self {
        if code_point <= u8::MAX as u64 {
            CharKind::U8
        } else if code_point <= u16::MAX as u64 {
            CharKind::U16
        } else if code_point <= u32::MAX as u64 {
            CharKind::U32
        } else {
            CharKind::U64
        }
    }
}

impl fmt::Display for CharKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.bits())
    }
}
