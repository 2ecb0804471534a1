use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered list of routes to revalidate after a successful invocation.
///
/// Owned by a single invocation: the caller builds it, the action reads it.
/// Order is preserved and duplicates are kept, so a path listed twice is
/// revalidated twice.
///
/// ```
/// use safeact_action::RevalidationPaths;
///
/// let mut paths = RevalidationPaths::from(["/", "/alerts"]);
/// paths.push("/inbox");
///
/// assert_eq!(paths.len(), 3);
/// assert_eq!(paths.iter().collect::<Vec<_>>(), vec!["/", "/alerts", "/inbox"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevalidationPaths(Vec<String>);

impl RevalidationPaths {
    /// An empty list.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a path.
    pub fn push(&mut self, path: impl Into<String>) {
        self.0.push(path.into());
    }

    /// Appends a path, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, path: impl Into<String>) -> Self {
        self.push(path);
        self
    }

    /// Iterates the paths in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there is nothing to revalidate.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `path` is in the list.
    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|p| p == path)
    }

    /// The paths as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consumes the list.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for RevalidationPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

impl From<Vec<String>> for RevalidationPaths {
    fn from(paths: Vec<String>) -> Self {
        Self(paths)
    }
}

impl From<Vec<&str>> for RevalidationPaths {
    fn from(paths: Vec<&str>) -> Self {
        paths.into_iter().collect()
    }
}

impl<const N: usize> From<[&str; N]> for RevalidationPaths {
    fn from(paths: [&str; N]) -> Self {
        paths.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for RevalidationPaths {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for RevalidationPaths {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for RevalidationPaths {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RevalidationPaths {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
