//! The cache-invalidation seam.
//!
//! The hosting framework owns the route cache; actions only see the
//! [`Revalidator`] trait. [`RouteCache`] is an in-process implementation
//! that records what was invalidated, used by the demo app and by tests.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// A failed revalidation of one path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot revalidate `{path}`: {message}")]
pub struct RevalidationError {
    /// The path that could not be revalidated.
    pub path: String,
    /// Why it failed.
    pub message: String,
}

impl RevalidationError {
    /// Create an error for `path`.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Invalidates a cached route so it is recomputed on next access.
///
/// Synchronous and side-effecting; called once per path, in list order.
pub trait Revalidator: Send + Sync {
    /// Invalidate `path`.
    fn revalidate(&self, path: &str) -> Result<(), RevalidationError>;
}

impl<R: Revalidator + ?Sized> Revalidator for Arc<R> {
    fn revalidate(&self, path: &str) -> Result<(), RevalidationError> {
        (**self).revalidate(path)
    }
}

impl<R: Revalidator + ?Sized> Revalidator for Box<R> {
    fn revalidate(&self, path: &str) -> Result<(), RevalidationError> {
        (**self).revalidate(path)
    }
}

/// Revalidator that accepts every path and does nothing.
///
/// The default for actions built without a revalidator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRevalidator;

impl Revalidator for NoopRevalidator {
    fn revalidate(&self, path: &str) -> Result<(), RevalidationError> {
        tracing::trace!(path, "no revalidator configured; ignoring");
        Ok(())
    }
}

/// Adapts a closure into a [`Revalidator`].
///
/// ```
/// use safeact_action::revalidate::{FnRevalidator, Revalidator, RevalidationError};
///
/// let revalidator = FnRevalidator::new(|path: &str| {
///     if path.starts_with('/') {
///         Ok(())
///     } else {
///         Err(RevalidationError::new(path, "paths must be absolute"))
///     }
/// });
///
/// assert!(revalidator.revalidate("/alerts").is_ok());
/// assert!(revalidator.revalidate("alerts").is_err());
/// ```
pub struct FnRevalidator<F>(F);

impl<F> FnRevalidator<F>
where
    F: Fn(&str) -> Result<(), RevalidationError> + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Revalidator for FnRevalidator<F>
where
    F: Fn(&str) -> Result<(), RevalidationError> + Send + Sync,
{
    fn revalidate(&self, path: &str) -> Result<(), RevalidationError> {
        (self.0)(path)
    }
}

impl<F> fmt::Debug for FnRevalidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnRevalidator(<function>)")
    }
}

// ============================================================================
// ROUTE CACHE
// ============================================================================

#[derive(Debug, Default)]
struct CacheState {
    /// Every successful invalidation, in call order.
    log: Vec<String>,
    /// Invalidation count per path.
    counts: HashMap<String, u64>,
    /// Known routes; only consulted when the cache is strict.
    routes: HashSet<String>,
}

/// In-process route cache that records invalidations.
///
/// A lenient cache (the default) accepts any path. A strict cache only
/// accepts registered routes and fails with "route not found" otherwise.
///
/// ```
/// use safeact_action::revalidate::{Revalidator, RouteCache};
///
/// let cache = RouteCache::strict(["/", "/alerts"]);
/// cache.revalidate("/alerts").unwrap();
/// assert!(cache.revalidate("/missing").is_err());
///
/// assert_eq!(cache.revalidations(), vec!["/alerts".to_string()]);
/// assert_eq!(cache.count("/alerts"), 1);
/// ```
#[derive(Debug, Default)]
pub struct RouteCache {
    state: Mutex<CacheState>,
    strict: bool,
}

impl RouteCache {
    /// A cache that accepts every path.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that only accepts the given routes.
    pub fn strict<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state = CacheState {
            routes: routes.into_iter().map(Into::into).collect(),
            ..CacheState::default()
        };
        Self {
            state: Mutex::new(state),
            strict: true,
        }
    }

    /// Registers a route with a strict cache.
    pub fn register(&self, route: impl Into<String>) {
        self.state.lock().routes.insert(route.into());
    }

    /// Every successful invalidation, in call order.
    pub fn revalidations(&self) -> Vec<String> {
        self.state.lock().log.clone()
    }

    /// How many times `path` has been invalidated.
    pub fn count(&self, path: &str) -> u64 {
        self.state.lock().counts.get(path).copied().unwrap_or(0)
    }

    /// Forgets recorded invalidations; registered routes stay.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.log.clear();
        state.counts.clear();
    }
}

impl Revalidator for RouteCache {
    fn revalidate(&self, path: &str) -> Result<(), RevalidationError> {
        let mut state = self.state.lock();
        if self.strict && !state.routes.contains(path) {
            return Err(RevalidationError::new(path, "route not found"));
        }
        state.log.push(path.to_owned());
        *state.counts.entry(path.to_owned()).or_default() += 1;
        tracing::debug!(path, "route invalidated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_cache_records_in_order() {
        let cache = RouteCache::new();
        for path in ["/b", "/a", "/b"] {
            cache.revalidate(path).unwrap();
        }
        assert_eq!(cache.revalidations(), vec!["/b", "/a", "/b"]);
        assert_eq!(cache.count("/b"), 2);
        assert_eq!(cache.count("/a"), 1);
        assert_eq!(cache.count("/c"), 0);
    }

    #[test]
    fn strict_cache_rejects_unknown_routes() {
        let cache = RouteCache::strict(["/"]);
        let err = cache.revalidate("/nope").unwrap_err();
        assert_eq!(err, RevalidationError::new("/nope", "route not found"));
        assert!(cache.revalidations().is_empty());

        cache.register("/nope");
        assert!(cache.revalidate("/nope").is_ok());
    }

    #[test]
    fn clear_keeps_routes() {
        let cache = RouteCache::strict(["/"]);
        cache.revalidate("/").unwrap();
        cache.clear();
        assert!(cache.revalidations().is_empty());
        assert!(cache.revalidate("/").is_ok());
    }

    #[test]
    fn shared_cache_through_arc() {
        let cache = Arc::new(RouteCache::new());
        let revalidator: Arc<dyn Revalidator> = cache.clone();
        revalidator.revalidate("/").unwrap();
        assert_eq!(cache.count("/"), 1);
    }

    #[test]
    fn noop_accepts_everything() {
        assert!(NoopRevalidator.revalidate("anything").is_ok());
    }
}
