//! Conversion from host values into [`StringView`]s.

use super::StringView;
use crate::error::{Result, ScorerError};

/// A value supplied by the host object model.
///
/// Hosts hand arbitrary values to the scorer layer; only textual values can
/// become strings. `None` is the "no match" sentinel that scorers flagged
/// with `NONE_IS_WORST_SCORE` collapse to their worst score.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// Absent value
    None,
    /// Unicode text
    Text(String),
    /// Bytes expected to hold UTF-8
    Bytes(Vec<u8>),
    /// Already decoded code points
    CodePoints(Vec<u64>),
    /// Integer (not a string)
    Integer(i64),
    /// Float (not a string)
    Float(f64),
}

impl HostValue {
    /// Returns true for the `None` sentinel.
    pub fn is_none(&self) -> bool {
        matches!(self, HostValue::None)
    }

    fn type_name(&self) -> &'static str {
        match self {
            HostValue::None => "none",
            HostValue::Text(_) => "text",
            HostValue::Bytes(_) => "bytes",
            HostValue::CodePoints(_) => "code points",
            HostValue::Integer(_) => "integer",
            HostValue::Float(_) => "float",
        }
    }
}

impl From<&str> for HostValue {
    fn from(text: &str) -> Self {
        HostValue::Text(text.to_string())
    }
}

impl From<String> for HostValue {
    fn from(text: String) -> Self {
        HostValue::Text(text)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(HostValue::None, Into::into)
    }
}

/// Conversion of a value into the canonical string representation.
pub trait IntoStringView {
    /// Converts `self` into a freshly owned [`StringView`].
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Conversion`] if the value cannot be interpreted
    /// as a decodable sequence.
    fn to_string_view(&self) -> Result<StringView>;
}

impl IntoStringView for str {
    fn to_string_view(&self) -> Result<StringView> {
        Ok(StringView::from_text(self))
    }
}

impl IntoStringView for String {
    fn to_string_view(&self) -> Result<StringView> {
        Ok(StringView::from_text(self))
    }
}

impl IntoStringView for [char] {
    fn to_string_view(&self) -> Result<StringView> {
        Ok(StringView::from_code_points(
            self.iter().map(|&c| u64::from(u32::from(c))),
        ))
    }
}

impl IntoStringView for [u64] {
    fn to_string_view(&self) -> Result<StringView> {
        Ok(StringView::from_code_points(self.iter().copied()))
    }
}

impl IntoStringView for HostValue {
    fn to_string_view(&self) -> Result<StringView> {
        match self {
            HostValue::Text(text) => Ok(StringView::from_text(text)),
            HostValue::Bytes(bytes) => StringView::from_utf8(bytes),
            HostValue::CodePoints(points) => Ok(StringView::from_code_points(points.iter().copied())),
            other => Err(ScorerError::Conversion(format!(
                "cannot convert {} value into a string",
                other.type_name()
            ))),
        }
    }
}
