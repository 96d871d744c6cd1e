use maud::{Markup, html};

use crate::html::BUTTON_PRIMARY_STYLE;

/// The view shown when no route matches the current path.
pub(crate) fn not_found_view(home_path: &str) -> Markup {
    html! {
        section class="error-page"
        {
            h1 class="error-code" { "404" }

            p class="error-description" { "Page not found." }

            p class="error-fix" { "Check the address or head back to the dashboard." }

            a
                href=(home_path)
                class=(BUTTON_PRIMARY_STYLE)
            {
                "Back to Dashboard"
            }
        }
    }
}
