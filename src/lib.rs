//! Pocket Ledger is a single-user web app for tracking incomes and outcomes.
//!
//! The library provides:
//! - a persistent transaction store over two ledgers, built on a pluggable
//!   key/value storage port,
//! - a router that keeps the active view in sync with the browser history,
//! - a serial command queue that owns all mutable state,
//! - an axum REST API that directly serves HTML pages rendered with maud.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod ledger_page;
mod logging;
mod navigation;
mod not_found;
mod pages;
pub mod router;
mod routing;
pub mod service;
pub mod storage;
mod theme;
mod timezone;
pub mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pages::{View, app_routes};
pub use routing::build_router;
pub use theme::Theme;
pub use timezone::get_local_offset;

use crate::{alert::Alert, html::error_view};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used as a transaction motive.
    #[error("Motive cannot be empty")]
    EmptyMotive,

    /// The amount could not be parsed, was zero, or was not a finite number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A ledger name other than "incomes" or "outcomes" was given.
    #[error("\"{0}\" is not a ledger, expected \"incomes\" or \"outcomes\"")]
    UnknownNature(String),

    /// A theme name that is not one of the built-in themes was given.
    #[error("\"{0}\" is not a known theme")]
    UnknownTheme(String),

    /// Two routes were registered with the same path.
    ///
    /// Route sets are fixed at composition time, so this is a configuration
    /// error that should stop the application from starting.
    #[error("the path \"{0}\" was registered more than once")]
    DuplicateRoute(String),

    /// A component that needs the navigation context was rendered without one.
    #[error("the navigation context can't be used outside of a router scope")]
    OutsideRouterScope,

    /// Tried to edit a transaction that is not in the ledger.
    #[error("tried to update a transaction that is not in the ledger")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that is not in the ledger.
    #[error("tried to delete a transaction that is not in the ledger")]
    DeleteMissingTransaction,

    /// Writing a value would exceed the storage quota.
    #[error("writing {size} bytes to \"{key}\" would exceed the storage quota of {quota} bytes")]
    StorageQuotaExceeded {
        /// The key that was being written.
        key: String,
        /// The size in bytes of the rejected value.
        size: usize,
        /// The storage quota in bytes.
        quota: usize,
    },

    /// An error occurred while serializing or deserializing JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The home path given at startup is not an absolute path.
    #[error("the home path \"{0}\" must start with '/'")]
    InvalidHomePath(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The task that owns the application state has stopped.
    #[error("the application service is not running")]
    ServiceUnavailable,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("An unexpected error occurred: {}", self);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_view(
                "Internal Server Error",
                "500",
                "Sorry, something went wrong.",
                "Try again later or check the server logs",
            ),
        )
            .into_response()
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (status, message, details) = match &self {
            Error::EmptyMotive | Error::InvalidAmount(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid transaction",
                self.to_string(),
            ),
            Error::UnknownNature(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid ledger",
                self.to_string(),
            ),
            Error::UnknownTheme(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid theme",
                self.to_string(),
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                "Could not update transaction",
                "The transaction could not be found.".to_owned(),
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                "Could not delete transaction",
                "The transaction could not be found. \
                Try refreshing the page to see if the transaction has already been deleted."
                    .to_owned(),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (
            status,
            Alert::Error {
                message: message.to_owned(),
                details,
            },
        )
            .into_response()
    }
}
