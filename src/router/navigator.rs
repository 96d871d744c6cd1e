//! The router state machine.

use crate::Error;

use super::{
    history::History,
    route::{Route, Routes},
};

/// What a call to [HistoryRouter::navigate] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The path was already active, so no history entry was added.
    Unchanged,
    /// A history entry was added and the router moved to it.
    Pushed,
}

/// The view selected for the current path.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a, V> {
    /// A registered route matches the current path.
    Matched(&'a Route<V>),
    /// No registered route matches the current path.
    NotFound,
}

impl<'a, V> Resolution<'a, V> {
    /// The matched view, or `None` for [Resolution::NotFound].
    pub fn view(&self) -> Option<&'a V> {
        match self {
            Resolution::Matched(route) => Some(route.view()),
            Resolution::NotFound => None,
        }
    }
}

/// The navigation state handed to components that render links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    current_path: String,
    home_path: String,
}

impl NavigationContext {
    /// Create a context for a router whose current path is `current_path`.
    pub fn new(current_path: &str, home_path: &str) -> Self {
        Self {
            current_path: current_path.to_owned(),
            home_path: home_path.to_owned(),
        }
    }

    /// The path of the active history entry.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// The path of the dashboard.
    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    /// Whether `path` is the active path.
    pub fn is_current(&self, path: &str) -> bool {
        self.current_path == path
    }
}

/// Get the navigation context a component was given.
///
/// # Errors
/// Returns [Error::OutsideRouterScope] if `context` is `None`, i.e. the
/// component is being rendered outside of a router.
pub fn require_navigation(
    context: Option<&NavigationContext>,
) -> Result<&NavigationContext, Error> {
    context.ok_or(Error::OutsideRouterScope)
}

/// Keeps the current path in sync with a [History] and resolves it against
/// a set of routes.
#[derive(Debug)]
pub struct HistoryRouter<H, V> {
    history: H,
    routes: Routes<V>,
    home_path: String,
    current_path: String,
}

impl<H: History, V> HistoryRouter<H, V> {
    /// Create a router starting at the current location of `history`.
    pub fn new(history: H, routes: Routes<V>, home_path: &str) -> Self {
        let current_path = history.location().to_owned();

        Self {
            history,
            routes,
            home_path: home_path.to_owned(),
            current_path,
        }
    }

    /// The active path.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// The history the router is synchronized with.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access to the history, e.g. to move back or forward.
    ///
    /// Call [HistoryRouter::synchronize] after moving the history.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Go to `to`, adding a history entry unless `to` is already active.
    pub fn navigate(&mut self, to: &str) -> Navigation {
        if to == self.current_path {
            tracing::debug!("Already at {to}, ignoring navigation");
            return Navigation::Unchanged;
        }

        self.history.push_state(to);
        self.synchronize();

        Navigation::Pushed
    }

    /// Adopt the history's current location as the active path.
    ///
    /// This is the handler for history moves the router did not make itself,
    /// such as the browser's back and forward buttons. It never adds a
    /// history entry.
    pub fn synchronize(&mut self) {
        let location = self.history.location();

        if location != self.current_path {
            tracing::debug!("Navigating from {} to {location}", self.current_path);
            self.current_path = location.to_owned();
        }
    }

    /// The route for the active path.
    pub fn resolve(&self) -> Resolution<'_, V> {
        match self.routes.resolve(&self.current_path) {
            Some(route) => Resolution::Matched(route),
            None => Resolution::NotFound,
        }
    }

    /// Replace the route set, keeping the active path.
    pub fn recompose(&mut self, routes: Routes<V>) {
        self.routes = routes;
    }

    /// The navigation state for components rendered by this router.
    pub fn context(&self) -> NavigationContext {
        NavigationContext::new(&self.current_path, &self.home_path)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        router::{History, MemoryHistory, Route, Routes},
    };

    use super::{
        HistoryRouter, Navigation, NavigationContext, Resolution, require_navigation,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Page {
        Dashboard,
        Incomes,
        Outcomes,
    }

    fn routes() -> Routes<Page> {
        Routes::new(vec![
            Route::new("/", Page::Dashboard),
            Route::new("/incomes", Page::Incomes),
            Route::new("/outcomes", Page::Outcomes),
        ])
        .unwrap()
    }

    fn router_at(path: &str) -> HistoryRouter<MemoryHistory, Page> {
        HistoryRouter::new(MemoryHistory::new(path), routes(), "/")
    }

    #[test]
    fn starts_at_history_location() {
        let router = router_at("/outcomes");

        assert_eq!(router.current_path(), "/outcomes");
        assert_eq!(router.resolve().view(), Some(&Page::Outcomes));
    }

    #[test]
    fn navigate_pushes_and_resolves() {
        let mut router = router_at("/");

        let navigation = router.navigate("/incomes");

        assert_eq!(navigation, Navigation::Pushed);
        assert_eq!(router.current_path(), "/incomes");
        assert_eq!(router.history().location(), "/incomes");
        assert_eq!(router.history().len(), 2);
        assert_eq!(router.resolve().view(), Some(&Page::Incomes));
    }

    #[test]
    fn navigate_to_current_path_is_a_no_op() {
        let mut router = router_at("/incomes");

        let navigation = router.navigate("/incomes");

        assert_eq!(navigation, Navigation::Unchanged);
        assert_eq!(router.history().len(), 1);
        assert_eq!(router.current_path(), "/incomes");
    }

    #[test]
    fn back_restores_previous_path_without_pushing() {
        let mut router = router_at("/");
        router.navigate("/incomes");
        router.navigate("/outcomes");

        assert!(router.history_mut().back());
        router.synchronize();

        assert_eq!(router.current_path(), "/incomes");
        assert_eq!(router.resolve().view(), Some(&Page::Incomes));
        assert_eq!(router.history().len(), 3);
    }

    #[test]
    fn forward_after_back_returns_to_later_path() {
        let mut router = router_at("/");
        router.navigate("/incomes");
        router.history_mut().back();
        router.synchronize();

        router.history_mut().forward();
        router.synchronize();

        assert_eq!(router.current_path(), "/incomes");
        assert_eq!(router.history().len(), 2);
    }

    #[test]
    fn current_path_always_matches_history() {
        let mut router = router_at("/");
        let steps: [fn(&mut HistoryRouter<MemoryHistory, Page>); 5] = [
            |router| {
                router.navigate("/incomes");
            },
            |router| {
                router.navigate("/incomes");
            },
            |router| {
                router.history_mut().back();
                router.synchronize();
            },
            |router| {
                router.navigate("/nowhere");
            },
            |router| {
                router.history_mut().back();
                router.synchronize();
            },
        ];

        for step in steps {
            step(&mut router);
            assert_eq!(router.current_path(), router.history().location());
        }
    }

    #[test]
    fn unknown_path_resolves_to_not_found() {
        let mut router = router_at("/");

        router.navigate("/settings");

        assert_eq!(router.resolve(), Resolution::NotFound);
        assert_eq!(router.current_path(), "/settings");
    }

    #[test]
    fn recompose_keeps_current_path() {
        let mut router = router_at("/");
        router.navigate("/outcomes");

        router.recompose(routes());

        assert_eq!(router.current_path(), "/outcomes");
        assert_eq!(router.resolve().view(), Some(&Page::Outcomes));
    }

    #[test]
    fn context_reflects_current_path() {
        let mut router = router_at("/");
        router.navigate("/incomes");

        let context = router.context();

        assert_eq!(context, NavigationContext::new("/incomes", "/"));
        assert!(context.is_current("/incomes"));
        assert!(!context.is_current("/"));
    }

    #[test]
    fn missing_context_is_an_error() {
        let context = NavigationContext::new("/", "/");

        assert_eq!(require_navigation(None), Err(Error::OutsideRouterScope));
        assert_eq!(require_navigation(Some(&context)), Ok(&context));
    }
}
