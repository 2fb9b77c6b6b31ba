//! Canonical string representation.
//!
//! A [`StringView`] is a decoded sequence of code points stored with the
//! narrowest fixed code-unit width that holds all of them. It owns its
//! buffer and an optional [`ReleaseHook`] which runs exactly once when the
//! view is dropped.

mod host;
mod kind;


use std::fmt;

pub use host::{HostValue, IntoStringView};
pub use kind::CharKind;

use crate::error::{Result, ScorerError};
use crate::release::ReleaseHook;

/// Owned backing storage, one variant per width.
enum Units {
    U8(Box<[u8]>),
    U16(Box<[u16]>),
    U32(Box<[u32]>),
    U64(Box<[u64]>),
}

/// Borrowed view of a string's code units.
///
/// Algorithms match on this to specialize per width without copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeUnits<'a> {
    U8(&'a [u8]),
    U16(&'a [u16]),
    U32(&'a [u32]),
    U64(&'a [u64]),
}

impl CodeUnits<'_> {
    /// Width of the units.
    pub fn kind(&self) -> CharKind {
        match self {
            CodeUnits::U8(_) => CharKind::U8,
            CodeUnits::U16(_) => CharKind::U16,
            CodeUnits::U32(_) => CharKind::U32,
            CodeUnits::U64(_) => CharKind::U64,
        }
    }

    /// Number of code units.
    pub fn len(&self) -> usize {
        match self {
            CodeUnits::U8(s) => s.len(),
            CodeUnits::U16(s) => s.len(),
            CodeUnits::U32(s) => s.len(),
            CodeUnits::U64(s) => s.len(),
        }
    }

    /// Returns true if there are no code units.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Code point at `index`, widened to `u64`.
    pub fn get(&self, index: usize) -> Option<u64> {
        match self {
            CodeUnits::U8(s) => s.get(index).map(|&c| u64::from(c)),
            CodeUnits::U16(s) => s.get(index).map(|&c| u64::from(c)),
            CodeUnits::U32(s) => s.get(index).map(|&c| u64::from(c)),
            CodeUnits::U64(s) => s.get(index).copied(),
        }
    }
}

/// A decoded string with fixed-width code units and explicit ownership.
///
/// # Examples
///
/// ```
/// use matchforge_core::{CharKind, StringView};
///
/// let ascii = StringView::from_text("kitten");
/// assert_eq!(ascii.kind(), CharKind::U8);
/// assert_eq!(ascii.len(), 6);
///
/// let greek = StringView::from_text("λόγος");
/// assert_eq!(greek.kind(), CharKind::U16);
/// ```
pub struct StringView {
    units: Units,
    release: ReleaseHook,
}

impl StringView {
    /// Creates an empty string.
    pub fn empty() -> Self {
        Self::from_units(Units::U8(Box::new([])))
    }

    /// Creates a string from already decoded code points.
    ///
    /// The narrowest kind holding every code point is selected.
    pub fn from_code_points<I>(code_points: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let points: Vec<u64> = code_points.into_iter().collect();
        let max = points.iter().copied().max().unwrap_or(0);
        let units = match CharKind::narrowest_for(max) {
            CharKind::U8 => Units::U8(points.iter().map(|&c| c as u8).collect()),
            CharKind::U16 => Units::U16(points.iter().map(|&c| c as u16).collect()),
            CharKind::U32 => Units::U32(points.iter().map(|&c| c as u32).collect()),
            CharKind::U64 => Units::U64(points.into_boxed_slice()),
        };
        Self::from_units(units)
    }

    /// Creates a string from Rust text, one code point per `char`.
    pub fn from_text(text: &str) -> Self {
        Self::from_code_points(text.chars().map(|c| u64::from(u32::from(c))))
    }

    /// Creates a string whose code units are the given raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_units(Units::U8(bytes.into()))
    }

    /// Decodes UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Conversion`] if `bytes` is not valid UTF-8.
    pub fn from_utf8(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            ScorerError::Conversion(format!("invalid UTF-8 input: {}", e))
        })?;
        Ok(Self::from_text(text))
    }

    /// Decodes UTF-16 code units.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Conversion`] on an unpaired surrogate.
    pub fn from_utf16(units: &[u16]) -> Result<Self> {
        let mut points = Vec::with_capacity(units.len());
        for decoded in char::decode_utf16(units.iter().copied()) {
            let c = decoded.map_err(|e| {
                ScorerError::Conversion(format!(
                    "unpaired surrogate 0x{:04X} in UTF-16 input",
                    e.unpaired_surrogate()
                ))
            })?;
            points.push(u64::from(u32::from(c)));
        }
        Ok(Self::from_code_points(points))
    }

    /// Attaches a release action, run exactly once when this view is dropped.
    ///
    /// An already attached hook is kept and runs first, at the same drop.
    pub fn with_release(mut self, hook: ReleaseHook) -> Self {
        self.release = std::mem::take(&mut self.release).then(hook);
        self
    }

    fn from_units(units: Units) -> Self {
        Self {
            units,
            release: ReleaseHook::none(),
        }
    }

    /// Width of the backing code units.
    pub fn kind(&self) -> CharKind {
        self.units().kind()
    }

    /// Number of code points.
    pub fn len(&self) -> usize {
        self.units().len()
    }

    /// Returns true if the string has no code points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrowed code units.
    pub fn units(&self) -> CodeUnits<'_> {
        match &self.units {
            Units::U8(s) => CodeUnits::U8(s),
            Units::U16(s) => CodeUnits::U16(s),
            Units::U32(s) => CodeUnits::U32(s),
            Units::U64(s) => CodeUnits::U64(s),
        }
    }

    /// Code point at `index`.
    pub fn get(&self, index: usize) -> Option<u64> {
        self.units().get(index)
    }

    /// Iterates over code points, widened to `u64`.
    pub fn code_points(&self) -> CodePoints<'_> {
        CodePoints {
            units: self.units(),
            front: 0,
            back: self.len(),
        }
    }

    /// Copies the code points into a vector.
    pub fn to_code_points(&self) -> Vec<u64> {
        self.code_points().collect()
    }

    /// Returns the text if every code point is a Unicode scalar value.
    pub fn to_text(&self) -> Option<String> {
        self.code_points()
            .map(|c| u32::try_from(c).ok().and_then(char::from_u32))
            .collect()
    }
}

impl Default for StringView {
    fn default() -> Self {
        Self::empty()
    }
}

impl Clone for StringView {
    /// Clones the code units. The clone owns a fresh buffer and carries no
    /// release hook of its own.
    fn clone(&self) -> Self {
        let units = match &self.units {
            Units::U8(s) => Units::U8(s.clone()),
            Units::U16(s) => Units::U16(s.clone()),
            Units::U32(s) => Units::U32(s.clone()),
            Units::U64(s) => Units::U64(s.clone()),
        };
        Self::from_units(units)
    }
}

impl PartialEq for StringView {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.code_points().eq(other.code_points())
    }
}

impl Eq for StringView {}

impl fmt::Debug for StringView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => write!(f, "StringView<{}>({:?})", self.kind(), text),
            None => write!(f, "StringView<{}>({:?})", self.kind(), self.to_code_points()),
        }
    }
}

impl From<&str> for StringView {
    fn from(text: &str) -> Self {
        StringView::from_text(text)
    }
}

impl From<String> for StringView {
    fn from(text: String) -> Self {
        StringView::from_text(&text)
    }
}

/// Iterator over the code points of a [`StringView`].
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    units: CodeUnits<'a>,
    front: usize,
    back: usize,
}

impl Iterator for CodePoints<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.front >= self.back {
            return None;
        }
        let c = self.units.get(self.front);
        self.front += 1;
        c
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for CodePoints<'_> {
    fn next_back(&mut self) -> Option<u64> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.units.get(self.back)
    }
}

impl ExactSizeIterator for CodePoints<'_> {}
