use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

use crate::{endpoints, theme::Theme};

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "button button-primary";
pub const BUTTON_SECONDARY_STYLE: &str = "button button-secondary";
pub const BUTTON_DELETE_STYLE: &str = "button button-delete";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "form-container";
pub const FORM_LABEL_STYLE: &str = "form-label";
pub const FORM_TEXT_INPUT_STYLE: &str = "form-input";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "page";

/// The id of the element swapped when navigating between views.
pub const APP_VIEW_ID: &str = "app-view";

/// The id of the element that holds the edit form while it is open.
pub const EDIT_MODAL_ID: &str = "edit-modal";

/// Clears the alert three seconds after it is shown. A newer alert cancels
/// the timer of the one it replaces.
const ALERT_DISMISS_SCRIPT: &str = r#"
(function () {
    let timer = null;

    function scheduleDismiss() {
        const container = document.getElementById("alert-container");
        if (timer !== null) {
            clearTimeout(timer);
            timer = null;
        }
        if (!container || container.childElementCount === 0) {
            return;
        }
        timer = setTimeout(function () {
            container.replaceChildren();
            timer = null;
        }, 3000);
    }

    document.addEventListener("htmx:afterSettle", scheduleDismiss);
    document.addEventListener("htmx:oobAfterSwap", scheduleDismiss);
})();
"#;

pub fn base(title: &str, theme: Theme, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                // Back/forward must always reach the server so the router follows the browser.
                meta name="htmx-config" content=r#"{"historyCacheSize":0}"#;
                title { (title) " - Pocket Ledger" }
                link href=(format!("{}/main.css", endpoints::STATIC)) rel="stylesheet";
                link rel="icon" href="data:,";

                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/response-targets.js" {}

                script { (PreEscaped(ALERT_DISMISS_SCRIPT)) }
            }

            body
                hx-ext="response-targets"
                class=(format!("app {}", theme.class_name()))
            {
                (content)

                div id=(EDIT_MODAL_ID) class="modal" {}

                // Alert container for out-of-band swaps
                div id="alert-container" class="alert-container" {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="error-page"
        {
            h1 class="error-code" { (header) }

            p class="error-description" { (description) }

            p class="error-fix" { (fix) }

            a href=(endpoints::ROOT) class=(BUTTON_PRIMARY_STYLE)
            {
                "Back to Dashboard"
            }
        }
    );

    base(title, Theme::default(), &content)
}

pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

pub fn format_currency_rounded(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    let number = number.round();

    if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        "$0".to_owned()
    }
}

/// Creates a span with `amount` rounded to the nearest whole number and a
/// tooltip (title) that shows `amount` rounded to two decimal places.
pub fn currency_rounded_with_tooltip(amount: f64) -> Markup {
    html!(
        span title=(format_currency(amount)) { (format_currency_rounded(amount)) }
    )
}
