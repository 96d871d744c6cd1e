//! A minimal router that keeps the active view in sync with browser history.
//!
//! - [Routes] is the fixed set of path to view mappings.
//! - [History] is the port to the session history, with an in-memory
//!   implementation and one that mirrors an htmx-driven browser.
//! - [HistoryRouter] holds the active path, adds history entries when
//!   navigating, follows back/forward moves, and resolves the active route.

mod history;
mod navigator;
mod route;

pub use history::{History, HtmxHistory, MemoryHistory};
pub use navigator::{
    HistoryRouter, Navigation, NavigationContext, Resolution, require_navigation,
};
pub use route::{Route, Routes};
