//! Declarative route registration.

use crate::Error;

/// Maps a path to the view shown while that path is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<V> {
    path: String,
    view: V,
}

impl<V> Route<V> {
    /// Create a route that shows `view` at exactly `path`.
    pub fn new(path: &str, view: V) -> Self {
        Self {
            path: path.to_owned(),
            view,
        }
    }

    /// The path the route matches.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The view the route shows.
    pub fn view(&self) -> &V {
        &self.view
    }
}

/// A fixed set of routes with unique paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes<V> {
    routes: Vec<Route<V>>,
}

impl<V> Routes<V> {
    /// Register `routes`.
    ///
    /// # Errors
    /// Returns [Error::DuplicateRoute] if two routes share a path.
    pub fn new(routes: Vec<Route<V>>) -> Result<Self, Error> {
        for (i, route) in routes.iter().enumerate() {
            if routes[..i].iter().any(|earlier| earlier.path == route.path) {
                return Err(Error::DuplicateRoute(route.path.clone()));
            }
        }

        Ok(Self { routes })
    }

    /// The route whose path is exactly `path`, or `None` if there isn't one.
    ///
    /// Matching is case sensitive and does not ignore trailing slashes.
    pub fn resolve(&self, path: &str) -> Option<&Route<V>> {
        self.routes.iter().find(|route| route.path == path)
    }

    /// The registered routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route<V>> {
        self.routes.iter()
    }
}
