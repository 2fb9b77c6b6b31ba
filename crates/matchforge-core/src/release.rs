//! Release hooks for owned ABI resources.
//!
//! Strings, keyword contexts and scorer instances each own a resource that
//! must be released exactly once. In Rust the release runs from `Drop`, so
//! it happens on every exit path (including `?` early returns) and the
//! handle can never be used afterwards.

use std::fmt;

/// A release action that runs exactly once, when the hook is dropped.
#[derive(Default)]
pub struct ReleaseHook {
    action: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ReleaseHook {
    /// Creates a hook that runs `action` on release.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            action: Some(Box::new(action)),
        }
    }

    /// Creates a hook with nothing to release.
    pub fn none() -> Self {
        Self { action: None }
    }

    /// Combines two hooks into one that runs `self`, then `next`.
    ///
    /// Neither action runs until the combined hook is dropped.
    pub fn then(mut self, mut next: ReleaseHook) -> Self {
        match (self.action.take(), next.action.take()) {
            (Some(first), Some(second)) => Self::new(move || {
                first();
                second();
            }),
            (first, second) => Self {
                action: first.or(second),
            },
        }
    }

    /// Returns true if a release action is attached.
    pub fn is_armed(&self) -> bool {
        self.action.is_some()
    }
}

impl Drop for ReleaseHook {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

impl fmt::Debug for ReleaseHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseHook")
            .field("armed", &self.is_armed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_runs_once_on_drop() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let hook = ReleaseHook::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert!(hook.is_armed());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        drop(hook);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_none_is_inert() {
        let hook = ReleaseHook::none();
        assert!(!hook.is_armed());
        drop(hook);
    }

    #[test]
    fn test_then_defers_both_in_order() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let (a, b) = (Arc::clone(&log), Arc::clone(&log));
        let hook = ReleaseHook::new(move || a.lock().unwrap().push("first"))
            .then(ReleaseHook::new(move || b.lock().unwrap().push("second")));
        assert!(hook.is_armed());
        assert!(log.lock().unwrap().is_empty());

        drop(hook);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);

        assert!(!ReleaseHook::none().then(ReleaseHook::none()).is_armed());
    }

    #[test]
    fn test_runs_on_early_return() {
        fn fails(hook: ReleaseHook) -> Result<(), ()> {
            let _held = hook;
            Err(())
        }

        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let hook = ReleaseHook::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert!(fails(hook).is_err());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
