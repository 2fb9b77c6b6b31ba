//! Preprocessors that canonicalize host values before scoring.
//!
//! A preprocessor is optional. When present it runs before any scorer sees
//! the string; when absent the raw representation is used unmodified.

use crate::error::{Result, ScorerError};
use crate::string::{HostValue, IntoStringView, StringView};
use crate::version::PREPROCESSOR_VERSION;

/// Converts a host value into a canonical [`StringView`].
///
/// The returned string follows the same ownership contract as any other
/// view: the caller owns it and it is released when dropped.
pub trait Preprocessor: Send + Sync {
    /// Struct version implemented by this preprocessor.
    fn version(&self) -> u32 {
        PREPROCESSOR_VERSION
    }

    /// Canonicalizes `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Conversion`] if `value` is not a string.
    fn preprocess(&self, value: &HostValue) -> Result<StringView>;
}

/// Checks that a preprocessor speaks a version this crate understands.
pub fn check_preprocessor(preprocessor: &dyn Preprocessor) -> Result<()> {
    let found = preprocessor.version();
    if found != PREPROCESSOR_VERSION {
        return Err(ScorerError::UnsupportedVersion {
            found,
            min: PREPROCESSOR_VERSION,
            max: PREPROCESSOR_VERSION,
        });
    }
    Ok(())
}

/// Converts `value`, running `preprocessor` when one is given.
pub fn preprocess_value(
    preprocessor: Option<&dyn Preprocessor>,
    value: &HostValue,
) -> Result<StringView> {
    match preprocessor {
        Some(p) => p.preprocess(value),
        None => value.to_string_view(),
    }
}

/// Passes the value through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Preprocessor for Identity {
    fn preprocess(&self, value: &HostValue) -> Result<StringView> {
        value.to_string_view()
    }
}

/// Lowercases, replaces every non-alphanumeric character with a space and
/// trims surrounding whitespace.
///
/// # Examples
///
/// ```
/// use matchforge_core::{DefaultProcess, HostValue, Preprocessor, StringView};
///
/// let s = DefaultProcess.preprocess(&HostValue::from("  Hello, World! ")).unwrap();
/// assert_eq!(s, StringView::from_text("hello  world"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProcess;

impl DefaultProcess {
    fn canonical_char(c: char, out: &mut Vec<u64>) {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase().map(|l| u64::from(u32::from(l))));
        } else {
            out.push(u64::from(u32::from(' ')));
        }
    }
}

impl Preprocessor for DefaultProcess {
    fn preprocess(&self, value: &HostValue) -> Result<StringView> {
        let raw = value.to_string_view()?;
        let mut out = Vec::with_capacity(raw.len());
        for code_point in raw.code_points() {
            match u32::try_from(code_point).ok().and_then(char::from_u32) {
                Some(c) => Self::canonical_char(c, &mut out),
                // Not a scalar value; kept as-is.
                None => out.push(code_point),
            }
        }

        let is_space = |c: &u64| {
            u32::try_from(*c)
                .ok()
                .and_then(char::from_u32)
                .is_some_and(char::is_whitespace)
        };
        let start = out.iter().position(|c| !is_space(c)).unwrap_or(out.len());
        let end = out.iter().rposition(|c| !is_space(c)).map_or(start, |i| i + 1);

        Ok(StringView::from_code_points(out[start..end].iter().copied()))
    }
}

/// Adapts a closure into a [`Preprocessor`].
pub struct FnPreprocessor<F> {
    func: F,
}

impl<F> FnPreprocessor<F>
where
    F: Fn(&HostValue) -> Result<StringView> + Send + Sync,
{
    /// Wraps `func`.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Preprocessor for FnPreprocessor<F>
where
    F: Fn(&HostValue) -> Result<StringView> + Send + Sync,
{
    fn preprocess(&self, value: &HostValue) -> Result<StringView> {
        (self.func)(value)
    }
}

impl<F> std::fmt::Debug for FnPreprocessor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnPreprocessor").finish()
    }
}
