//! Alert messages shown in the alert container at the bottom of the page.
//!
//! Error alerts are returned as the whole response body, which htmx swaps
//! into `#alert-container` via `hx-target-error`. Success alerts ride along
//! with a view fragment as an out-of-band swap.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An alert message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// A success message with extra details.
    Success { message: String, details: String },
    /// A success message with no details.
    SuccessSimple { message: String },
    /// An error message with extra details.
    Error { message: String, details: String },
}

impl Alert {
    fn parts(&self) -> (&'static str, &'static str, &str, &str) {
        match self {
            Alert::Success { message, details } => ("alert alert-success", "✓", message, details),
            Alert::SuccessSimple { message } => ("alert alert-success", "✓", message, ""),
            Alert::Error { message, details } => ("alert alert-error", "!", message, details),
        }
    }

    /// Render the alert box on its own.
    pub fn into_html(self) -> Markup {
        let (class, icon, message, details) = self.parts();

        html! {
            div class=(class) role="alert"
            {
                span class="alert-icon" aria-hidden="true" { (icon) }

                p class="alert-message" { (message) }

                @if !details.is_empty() {
                    p class="alert-details" { (details) }
                }

                button
                    type="button"
                    class="alert-dismiss"
                    aria-label="Dismiss"
                    onclick="document.getElementById('alert-container').replaceChildren()"
                {
                    "×"
                }
            }
        }
    }

    /// Render the alert so that it replaces the contents of the alert
    /// container when included in a response for another target.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div id="alert-container" hx-swap-oob="innerHTML"
            {
                (self.into_html())
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
