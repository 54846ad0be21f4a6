/// Client-side navigation effect. Implemented by whatever actually moves the
/// user (a router, a test recorder, a CLI printer).
pub trait Navigator {
    fn navigate(&mut self, route: &str);
}

/// Collects navigations in order. Useful as a test double and for dry runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingNavigator {
    pub visited: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: &str) {
        self.visited.push(route.to_string());
    }
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn navigate(&mut self, route: &str) {
        (**self).navigate(route)
    }
}

/// Drops a navigation identical to the previous one it forwarded.
///
/// Re-renders can ask for the same redirect several times in a row; only the
/// first reaches the inner navigator. A different route always goes through
/// (last write wins).
#[derive(Debug)]
pub struct NavigationGuard<N> {
    inner: N,
    last: Option<String>,
}

impl<N: Navigator> NavigationGuard<N> {
    pub fn new(inner: N) -> Self {
        Self { inner, last: None }
    }

    /// Forward `route` unless it repeats the last one. Returns whether the
    /// navigation was issued.
    pub fn navigate(&mut self, route: &str) -> bool {
        if self.last.as_deref() == Some(route) {
            tracing::debug!(route, "suppressed repeated navigation");
            return false;
        }
        self.inner.navigate(route);
        self.last = Some(route.to_string());
        true
    }

    /// Forget the last route, e.g. after the user navigated by hand.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn inner(&self) -> &N {
        &self.inner
    }

    pub fn into_inner(self) -> N {
        self.inner
    }
}
