//! Implements a struct that holds the state of the REST server.

use crate::{Error, service::AppHandle, timezone::get_local_offset};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The handle for sending commands to the task that owns the ledgers,
    /// the router and the theme.
    pub app: AppHandle,

    /// The path the dashboard is served at.
    pub home_path: String,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `home_path` should be the path `app` was started with and
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns:
    /// - [Error::InvalidHomePath] if `home_path` does not start with '/',
    /// - [Error::InvalidTimezoneError] if `local_timezone` is not a known
    ///   timezone.
    pub fn new(app: AppHandle, home_path: &str, local_timezone: &str) -> Result<Self, Error> {
        if !home_path.starts_with('/') {
            return Err(Error::InvalidHomePath(home_path.to_owned()));
        }

        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            app,
            home_path: home_path.to_owned(),
            local_timezone: local_timezone.to_owned(),
        })
    }
}
