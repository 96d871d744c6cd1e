//! Browser history ports.

/// The parts of a browser's session history the router depends on.
pub trait History {
    /// The path of the current history entry.
    fn location(&self) -> &str;

    /// Add a new entry for `path` and make it the current entry.
    fn push_state(&mut self, path: &str);
}

/// An in-memory session history with back and forward navigation.
///
/// Behaves like a browser tab: pushing an entry discards any entries ahead
/// of the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    /// Create a history with a single entry for `initial_path`.
    pub fn new(initial_path: &str) -> Self {
        Self {
            entries: vec![initial_path.to_owned()],
            index: 0,
        }
    }

    /// Move to the previous entry. Returns `false` if there is none.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }

        self.index -= 1;
        true
    }

    /// Move to the next entry. Returns `false` if there is none.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }

        self.index += 1;
        true
    }

    /// The number of entries in the history.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history has no entries, which is never the case.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &str {
        &self.entries[self.index]
    }

    fn push_state(&mut self, path: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_owned());
        self.index = self.entries.len() - 1;
    }
}

/// Mirrors the history of a browser driven by htmx.
///
/// The browser owns the real history. Pushes are recorded here and handed to
/// the browser in an `HX-Push-Url` response header, and back/forward moves
/// made in the browser are reported with [HtmxHistory::restore].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmxHistory {
    location: String,
    pending_push: Option<String>,
}

impl HtmxHistory {
    /// Create a history whose current entry is `initial_path`.
    pub fn new(initial_path: &str) -> Self {
        Self {
            location: initial_path.to_owned(),
            pending_push: None,
        }
    }

    /// Record that the browser moved to an existing entry for `path`, e.g.
    /// through its back button or a page load.
    pub fn restore(&mut self, path: &str) {
        self.location = path.to_owned();
        self.pending_push = None;
    }

    /// Take the path pushed since the last call, if any, so it can be sent
    /// to the browser.
    pub fn take_pending_push(&mut self) -> Option<String> {
        self.pending_push.take()
    }
}

impl History for HtmxHistory {
    fn location(&self) -> &str {
        &self.location
    }

    fn push_state(&mut self, path: &str) {
        self.location = path.to_owned();
        self.pending_push = Some(path.to_owned());
    }
}


#[cfg(test)]
mod htmx_history_tests {
    use super::{History, HtmxHistory};

    #[test]
    fn push_is_reported_once() {
        let mut history = HtmxHistory::new("/");

        history.push_state("/incomes");

        assert_eq!(history.location(), "/incomes");
        assert_eq!(history.take_pending_push(), Some("/incomes".to_owned()));
        assert_eq!(history.take_pending_push(), None);
    }

    #[test]
    fn restore_moves_without_pushing() {
        let mut history = HtmxHistory::new("/incomes");

        history.restore("/");

        assert_eq!(history.location(), "/");
        assert_eq!(history.take_pending_push(), None);
    }
}
