//! Access to the route the caller is rendered on.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// Returns the current route of the executing UI context.
///
/// Passed to the caller explicitly; there is no ambient router.
pub trait RouteAccessor: Send + Sync {
    /// The current route, e.g. `"/alerts"`.
    fn current_route(&self) -> String;
}

impl<F> RouteAccessor for F
where
    F: Fn() -> String + Send + Sync,
{
    fn current_route(&self) -> String {
        self()
    }
}

/// A route that never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRoute(String);

impl StaticRoute {
    /// Wraps a fixed route.
    pub fn new(route: impl Into<String>) -> Self {
        Self(route.into())
    }
}

impl RouteAccessor for StaticRoute {
    fn current_route(&self) -> String {
        self.0.clone()
    }
}

/// A route shared with the navigation layer.
///
/// Clones observe the same route, so whoever navigates updates every caller
/// holding a clone.
///
/// ```
/// use safeact_caller::route::{RouteAccessor, SharedRoute};
///
/// let route = SharedRoute::new("/");
/// let seen_by_caller = route.clone();
/// route.navigate("/alerts");
/// assert_eq!(seen_by_caller.current_route(), "/alerts");
/// ```
#[derive(Clone)]
pub struct SharedRoute(Arc<RwLock<String>>);

impl SharedRoute {
    /// Starts at `route`.
    pub fn new(route: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(route.into())))
    }

    /// Moves to `route`.
    pub fn navigate(&self, route: impl Into<String>) {
        let route = route.into();
        tracing::trace!(route = %route, "navigated");
        *self.0.write() = route;
    }
}

impl RouteAccessor for SharedRoute {
    fn current_route(&self) -> String {
        self.0.read().clone()
    }
}

impl fmt::Debug for SharedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedRoute").field(&*self.0.read()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_accessors() {
        let accessor = || "/inbox".to_string();
        assert_eq!(accessor.current_route(), "/inbox");
    }

    #[test]
    fn static_route_is_fixed() {
        assert_eq!(StaticRoute::new("/").current_route(), "/");
    }

    #[test]
    fn shared_route_debug_shows_current() {
        let route = SharedRoute::new("/a");
        route.navigate("/b");
        assert_eq!(format!("{route:?}"), r#"SharedRoute("/b")"#);
    }
}
