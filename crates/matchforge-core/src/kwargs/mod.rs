//! Keyword-argument contexts.
//!
//! A [`KwargsContext`] is built once per distinct [`ParamSet`] by a scorer's
//! kwargs constructor and then reused, read-only, by every construction and
//! call that depends on it. The context is opaque to the host: only the
//! scorer that built it knows the concrete type inside.

mod params;


use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

pub use params::{ParamSet, ParamValue};

use crate::error::{Result, ScorerError};
use crate::release::ReleaseHook;

struct KwargsInner {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
    // Declared after `value`: the hook runs once the context value is gone.
    _release: ReleaseHook,
}

/// Opaque, immutable scorer configuration.
///
/// Cloning shares the same context; the release hook runs when the last
/// clone is dropped.
#[derive(Clone)]
pub struct KwargsContext {
    inner: Arc<KwargsInner>,
}

impl KwargsContext {
    /// Wraps a scorer-specific configuration value.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::with_release(value, ReleaseHook::none())
    }

    /// Wraps a value together with its release action.
    pub fn with_release<T>(value: T, release: ReleaseHook) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            inner: Arc::new(KwargsInner {
                value: Box::new(value),
                type_name: type_name::<T>(),
                _release: release,
            }),
        }
    }

    /// A context carrying no configuration.
    pub fn empty() -> Self {
        Self::new(())
    }

    /// Borrows the configuration if it has type `T`.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.inner.value.downcast_ref::<T>()
    }

    /// Borrows the configuration as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Config`] when the context was built by a
    /// different scorer.
    pub fn downcast<T: Any>(&self) -> Result<&T> {
        self.get::<T>().ok_or_else(|| {
            ScorerError::Config(format!(
                "kwargs context holds {}, expected {}",
                self.inner.type_name,
                type_name::<T>()
            ))
        })
    }

    /// Name of the wrapped type.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name
    }

    /// Returns true if both handles share one context.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for KwargsContext {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for KwargsContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KwargsContext")
            .field("type", &self.inner.type_name)
            .finish()
    }
}
