//! The task that owns all mutable application state.
//!
//! Request handlers never touch the ledgers or the router directly. They send
//! a command through an [AppHandle] and wait for the reply. [AppService]
//! handles one command at a time, so every mutation and navigation runs to
//! completion before the next one starts, no matter how many requests are in
//! flight.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::{
    Error,
    pages::View,
    router::{HistoryRouter, HtmxHistory, Navigation, NavigationContext, Routes},
    storage::KeyValueStore,
    theme::{Theme, load_theme, save_theme},
    transaction::{
        Identity, LedgerSnapshot, Nature, NewTransaction, Transaction, TransactionPatch,
        TransactionStore,
    },
};

/// The maximum number of commands waiting to be handled.
const COMMAND_BUFFER_SIZE: usize = 64;

/// Everything needed to render a page: where the user is and what the
/// ledgers contain.
#[derive(Debug, Clone)]
pub struct PageState {
    /// The navigation state for the active path.
    pub context: NavigationContext,
    /// The view registered for the active path, `None` if no route matches.
    pub view: Option<View>,
    /// The ledgers and their derived views.
    pub snapshot: Arc<LedgerSnapshot>,
    /// The user's colour theme.
    pub theme: Theme,
}

/// The result of a navigation request.
#[derive(Debug, Clone)]
pub struct NavigationOutcome {
    /// Whether a history entry was added.
    pub navigation: Navigation,
    /// The path the browser should push onto its history, if any.
    pub push_url: Option<String>,
    /// The page after navigating.
    pub page: PageState,
}

/// The result of an edit or delete.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    /// `false` if no transaction matched and nothing changed.
    pub applied: bool,
    /// The page after the change.
    pub page: PageState,
}

enum Command {
    Page {
        reply: oneshot::Sender<PageState>,
    },
    Navigate {
        path: String,
        browser_path: Option<String>,
        reply: oneshot::Sender<NavigationOutcome>,
    },
    Restore {
        path: String,
        reply: oneshot::Sender<PageState>,
    },
    Add {
        nature: Nature,
        transaction: NewTransaction,
        browser_path: Option<String>,
        reply: oneshot::Sender<PageState>,
    },
    Edit {
        nature: Nature,
        identity: Identity,
        patch: TransactionPatch,
        browser_path: Option<String>,
        reply: oneshot::Sender<MutationOutcome>,
    },
    Delete {
        nature: Nature,
        identity: Identity,
        browser_path: Option<String>,
        reply: oneshot::Sender<MutationOutcome>,
    },
    SetTheme {
        theme: Theme,
        reply: oneshot::Sender<Theme>,
    },
}

/// Owns the transaction store, the router and the theme, and applies
/// commands to them one at a time.
#[derive(Debug)]
pub struct AppService<S> {
    store: TransactionStore<S>,
    router: HistoryRouter<HtmxHistory, View>,
    snapshot: Arc<LedgerSnapshot>,
    theme: Theme,
}

impl<S: KeyValueStore> AppService<S> {
    /// Load the ledgers and theme from `storage` and start the router at
    /// `home_path`.
    pub fn new(storage: S, routes: Routes<View>, home_path: &str) -> Self {
        let store = TransactionStore::new(storage);
        let snapshot = LedgerSnapshot::new(
            store.ledger(Nature::Incomes),
            store.ledger(Nature::Outcomes),
        );
        let theme = load_theme(store.storage());
        let router = HistoryRouter::new(HtmxHistory::new(home_path), routes, home_path);

        tracing::info!(
            "Loaded {} incomes and {} outcomes",
            snapshot.incomes.len(),
            snapshot.outcomes.len()
        );

        Self {
            store,
            router,
            snapshot: Arc::new(snapshot),
            theme,
        }
    }

    /// Start handling commands on a new task and return a handle for sending
    /// them.
    ///
    /// Must be called from within a tokio runtime. The task stops once every
    /// handle has been dropped.
    pub fn spawn(self) -> AppHandle
    where
        S: Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(COMMAND_BUFFER_SIZE);
        tokio::spawn(self.run(receiver));

        AppHandle { sender }
    }

    async fn run(mut self, mut receiver: mpsc::Receiver<Command>) {
        while let Some(command) = receiver.recv().await {
            self.handle(command);
        }

        tracing::debug!("All app handles dropped, stopping app service");
    }

    fn handle(&mut self, command: Command) {
        // A send only fails if the requester stopped waiting, in which case
        // there is nobody left to tell.
        match command {
            Command::Page { reply } => {
                let _ = reply.send(self.page());
            }
            Command::Navigate {
                path,
                browser_path,
                reply,
            } => {
                self.follow_browser(browser_path.as_deref());
                let _ = reply.send(self.navigate(&path));
            }
            Command::Restore { path, reply } => {
                self.restore(&path);
                let _ = reply.send(self.page());
            }
            Command::Add {
                nature,
                transaction,
                browser_path,
                reply,
            } => {
                self.follow_browser(browser_path.as_deref());
                let transactions = self.store.add(nature, transaction);
                self.replace_ledger(nature, transactions);
                let _ = reply.send(self.page());
            }
            Command::Edit {
                nature,
                identity,
                patch,
                browser_path,
                reply,
            } => {
                self.follow_browser(browser_path.as_deref());
                let update = self.store.edit(nature, identity, &patch);
                self.replace_ledger(nature, update.transactions);
                let _ = reply.send(MutationOutcome {
                    applied: update.applied,
                    page: self.page(),
                });
            }
            Command::Delete {
                nature,
                identity,
                browser_path,
                reply,
            } => {
                self.follow_browser(browser_path.as_deref());
                let update = self.store.delete(nature, identity);
                self.replace_ledger(nature, update.transactions);
                let _ = reply.send(MutationOutcome {
                    applied: update.applied,
                    page: self.page(),
                });
            }
            Command::SetTheme { theme, reply } => {
                save_theme(self.store.storage_mut(), theme);
                self.theme = theme;
                let _ = reply.send(theme);
            }
        }
    }

    fn restore(&mut self, path: &str) {
        self.router.history_mut().restore(path);
        self.router.synchronize();
    }

    /// Move the router to the path the requesting browser tab is showing.
    ///
    /// Every tab shares one router, so a request from a tab other than the
    /// one that last moved the router must first bring it back in step.
    fn follow_browser(&mut self, browser_path: Option<&str>) {
        if let Some(path) = browser_path.filter(|path| *path != self.router.current_path()) {
            tracing::debug!(
                "Browser is at {path}, not {}, restoring",
                self.router.current_path()
            );
            self.restore(path);
        }
    }

    fn navigate(&mut self, path: &str) -> NavigationOutcome {
        let navigation = self.router.navigate(path);
        let push_url = self.router.history_mut().take_pending_push();

        NavigationOutcome {
            navigation,
            push_url,
            page: self.page(),
        }
    }

    fn replace_ledger(&mut self, nature: Nature, transactions: Vec<Transaction>) {
        self.snapshot = Arc::new(self.snapshot.with_ledger(nature, transactions));
    }

    fn page(&self) -> PageState {
        PageState {
            context: self.router.context(),
            view: self.router.resolve().view().copied(),
            snapshot: Arc::clone(&self.snapshot),
            theme: self.theme,
        }
    }
}

/// Sends commands to a running [AppService].
///
/// Cloning the handle is cheap and every clone talks to the same service.
#[derive(Debug, Clone)]
pub struct AppHandle {
    sender: mpsc::Sender<Command>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Command::Page { .. } => "Page",
            Command::Navigate { .. } => "Navigate",
            Command::Restore { .. } => "Restore",
            Command::Add { .. } => "Add",
            Command::Edit { .. } => "Edit",
            Command::Delete { .. } => "Delete",
            Command::SetTheme { .. } => "SetTheme",
        };

        f.write_str(name)
    }
}

impl AppHandle {
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, Error> {
        let (reply, response) = oneshot::channel();

        self.sender
            .send(command(reply))
            .await
            .map_err(|_| Error::ServiceUnavailable)?;

        response.await.map_err(|_| Error::ServiceUnavailable)
    }

    /// The current page without changing anything.
    ///
    /// # Errors
    /// Returns [Error::ServiceUnavailable] if the service has stopped.
    pub async fn page(&self) -> Result<PageState, Error> {
        self.request(|reply| Command::Page { reply }).await
    }

    /// Navigate to `path`, adding a history entry unless it is already active.
    ///
    /// `browser_path` is the path the requesting tab is showing, if known.
    /// The router follows it before navigating, so "already active" is
    /// judged against that tab.
    ///
    /// # Errors
    /// Returns [Error::ServiceUnavailable] if the service has stopped.
    pub async fn navigate(
        &self,
        path: &str,
        browser_path: Option<&str>,
    ) -> Result<NavigationOutcome, Error> {
        let path = path.to_owned();
        let browser_path = browser_path.map(str::to_owned);
        self.request(|reply| Command::Navigate {
            path,
            browser_path,
            reply,
        })
        .await
    }

    /// Follow the browser to an existing history entry for `path`, e.g. after
    /// a page load or a back/forward move. Never adds a history entry.
    ///
    /// # Errors
    /// Returns [Error::ServiceUnavailable] if the service has stopped.
    pub async fn restore(&self, path: &str) -> Result<PageState, Error> {
        let path = path.to_owned();
        self.request(|reply| Command::Restore { path, reply }).await
    }

    /// Add `transaction` to the ledger `nature`.
    ///
    /// The returned page is the one at `browser_path` when it is given.
    ///
    /// # Errors
    /// Returns [Error::ServiceUnavailable] if the service has stopped.
    pub async fn add(
        &self,
        nature: Nature,
        transaction: NewTransaction,
        browser_path: Option<&str>,
    ) -> Result<PageState, Error> {
        let browser_path = browser_path.map(str::to_owned);
        self.request(|reply| Command::Add {
            nature,
            transaction,
            browser_path,
            reply,
        })
        .await
    }

    /// Apply `patch` to the transaction in `nature` matching `identity`.
    ///
    /// # Errors
    /// Returns [Error::ServiceUnavailable] if the service has stopped.
    pub async fn edit(
        &self,
        nature: Nature,
        identity: Identity,
        patch: TransactionPatch,
        browser_path: Option<&str>,
    ) -> Result<MutationOutcome, Error> {
        let browser_path = browser_path.map(str::to_owned);
        self.request(|reply| Command::Edit {
            nature,
            identity,
            patch,
            browser_path,
            reply,
        })
        .await
    }

    /// Delete the transaction in `nature` matching `identity`.
    ///
    /// # Errors
    /// Returns [Error::ServiceUnavailable] if the service has stopped.
    pub async fn delete(
        &self,
        nature: Nature,
        identity: Identity,
        browser_path: Option<&str>,
    ) -> Result<MutationOutcome, Error> {
        let browser_path = browser_path.map(str::to_owned);
        self.request(|reply| Command::Delete {
            nature,
            identity,
            browser_path,
            reply,
        })
        .await
    }

    /// Save `theme` as the user's theme.
    ///
    /// # Errors
    /// Returns [Error::ServiceUnavailable] if the service has stopped.
    pub async fn set_theme(&self, theme: Theme) -> Result<Theme, Error> {
        self.request(|reply| Command::SetTheme { theme, reply })
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        View, app_routes,
        router::Navigation,
        storage::{InMemoryKeyValueStore, KeyValueStore, save_transactions},
        theme::Theme,
        transaction::{Identity, Motive, Nature, NewTransaction, Transaction, TransactionPatch},
    };

    use super::{AppHandle, AppService};

    fn spawn_with(storage: InMemoryKeyValueStore) -> AppHandle {
        AppService::new(storage, app_routes("/").unwrap(), "/").spawn()
    }

    fn spawn() -> AppHandle {
        spawn_with(InMemoryKeyValueStore::new())
    }

    fn salary(time: i64) -> NewTransaction {
        NewTransaction {
            motive: Motive::new_unchecked("Salary"),
            amount: 1000.0,
            time,
        }
    }

    #[tokio::test]
    async fn starts_on_dashboard_with_stored_ledgers() {
        let mut storage = InMemoryKeyValueStore::new();
        let stored = vec![Transaction {
            nature: Nature::Outcomes,
            motive: Motive::new_unchecked("Rent"),
            amount: 500.0,
            time: 1000,
        }];
        save_transactions(&mut storage, "outcomes", &stored);
        storage.set("user-theme", "dark-blue-theme").unwrap();

        let page = spawn_with(storage).page().await.unwrap();

        assert_eq!(page.view, Some(View::Dashboard));
        assert_eq!(page.context.current_path(), "/");
        assert_eq!(page.snapshot.outcomes, stored);
        assert_eq!(page.theme, Theme::DarkBlue);
    }

    #[tokio::test]
    async fn navigate_pushes_new_path_once() {
        let app = spawn();

        let first = app.navigate("/incomes", None).await.unwrap();
        let second = app.navigate("/incomes", None).await.unwrap();

        assert_eq!(first.navigation, Navigation::Pushed);
        assert_eq!(first.push_url.as_deref(), Some("/incomes"));
        assert_eq!(first.page.view, Some(View::Incomes));
        assert_eq!(second.navigation, Navigation::Unchanged);
        assert_eq!(second.push_url, None);
        assert_eq!(second.page.context.current_path(), "/incomes");
    }

    #[tokio::test]
    async fn restore_follows_browser_without_pushing() {
        let app = spawn();
        app.navigate("/incomes", None).await.unwrap();
        app.navigate("/outcomes", None).await.unwrap();

        let page = app.restore("/incomes").await.unwrap();
        let again = app.navigate("/incomes", None).await.unwrap();

        assert_eq!(page.view, Some(View::Incomes));
        assert_eq!(again.navigation, Navigation::Unchanged);
    }

    #[tokio::test]
    async fn navigate_follows_requesting_tab_first() {
        let app = spawn();
        app.restore("/incomes").await.unwrap();
        // A second tab loads another view.
        app.restore("/outcomes").await.unwrap();

        let outcome = app.navigate("/outcomes", Some("/incomes")).await.unwrap();

        assert_eq!(outcome.navigation, Navigation::Pushed);
        assert_eq!(outcome.push_url.as_deref(), Some("/outcomes"));
        assert_eq!(outcome.page.view, Some(View::Outcomes));
    }

    #[tokio::test]
    async fn navigate_to_browser_path_is_unchanged() {
        let app = spawn();
        app.restore("/favicon.ico").await.unwrap();

        let outcome = app.navigate("/incomes", Some("/incomes")).await.unwrap();

        assert_eq!(outcome.navigation, Navigation::Unchanged);
        assert_eq!(outcome.push_url, None);
        assert_eq!(outcome.page.context.current_path(), "/incomes");
    }

    #[tokio::test]
    async fn mutation_renders_page_of_requesting_tab() {
        let app = spawn();
        app.restore("/outcomes").await.unwrap();

        let page = app
            .add(Nature::Incomes, salary(1000), Some("/incomes"))
            .await
            .unwrap();

        assert_eq!(page.view, Some(View::Incomes));
        assert_eq!(page.context.current_path(), "/incomes");
    }

    #[tokio::test]
    async fn unknown_path_has_no_view() {
        let app = spawn();

        let outcome = app.navigate("/nope", None).await.unwrap();

        assert_eq!(outcome.page.view, None);
        assert_eq!(outcome.page.context.current_path(), "/nope");
    }

    #[tokio::test]
    async fn add_updates_snapshot() {
        let app = spawn();

        let page = app.add(Nature::Incomes, salary(1000), None).await.unwrap();

        assert_eq!(page.snapshot.incomes.len(), 1);
        assert_eq!(page.snapshot.incomes[0].nature, Nature::Incomes);
        assert_eq!(page.snapshot.total_incomes, 1000.0);
        assert_eq!(page.snapshot.combined_sorted.len(), 1);
    }

    #[tokio::test]
    async fn edit_and_delete_report_whether_they_applied() {
        let app = spawn();
        app.add(Nature::Incomes, salary(1000), None).await.unwrap();
        let identity = Identity {
            time: 1000,
            amount: 1000.0,
        };
        let patch = TransactionPatch {
            amount: Some(1200.0),
            ..Default::default()
        };

        let edited = app.edit(Nature::Incomes, identity, patch.clone(), None).await.unwrap();
        let edited_again = app.edit(Nature::Incomes, identity, patch, None).await.unwrap();
        let deleted = app.delete(Nature::Incomes, identity, None).await.unwrap();

        assert!(edited.applied);
        assert_eq!(edited.page.snapshot.total_incomes, 1200.0);
        assert!(!edited_again.applied);
        assert!(!deleted.applied);
        assert_eq!(deleted.page.snapshot.incomes.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_adds_are_not_lost() {
        let app = spawn();

        let requests = (0..50).map(|time| {
            let app = app.clone();
            tokio::spawn(async move { app.add(Nature::Outcomes, salary(time), None).await })
        });
        for request in requests.collect::<Vec<_>>() {
            request.await.unwrap().unwrap();
        }

        let page = app.page().await.unwrap();
        assert_eq!(page.snapshot.outcomes.len(), 50);
    }

    #[tokio::test]
    async fn set_theme_persists() {
        let app = spawn();

        app.set_theme(Theme::Blue).await.unwrap();

        assert_eq!(app.page().await.unwrap().theme, Theme::Blue);
    }
}
