//! This file defines the navigation bar shown above every view.

use maud::{Markup, html};

use crate::{
    Error, endpoints,
    html::{APP_VIEW_ID, EDIT_MODAL_ID},
    router::{NavigationContext, require_navigation},
};

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "nav-link nav-link-current"
        } else {
            "nav-link"
        };

        html!(
            a
                href=(self.url)
                hx-get=(self.url)
                hx-target=(format!("#{APP_VIEW_ID}"))
                hx-swap="outerHTML"
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar for the router that rendered `context`.
    ///
    /// The link for the active path is marked as current.
    ///
    /// # Errors
    /// Returns [Error::OutsideRouterScope] if `context` is `None`.
    pub fn new(context: Option<&NavigationContext>) -> Result<NavBar<'_>, Error> {
        let context = require_navigation(context)?;

        let links = vec![
            Link {
                url: context.home_path(),
                title: "Dashboard",
                is_current: context.is_current(context.home_path()),
            },
            Link {
                url: endpoints::INCOMES_VIEW,
                title: "Incomes",
                is_current: context.is_current(endpoints::INCOMES_VIEW),
            },
            Link {
                url: endpoints::OUTCOMES_VIEW,
                title: "Outcomes",
                is_current: context.is_current(endpoints::OUTCOMES_VIEW),
            },
        ];

        Ok(NavBar { links })
    }

    /// Render the navigation bar.
    ///
    /// Set `out_of_band` when the bar is sent alongside a view fragment so
    /// htmx replaces the bar already on the page.
    pub fn into_html(self, out_of_band: bool) -> Markup {
        html!(
            nav
                id="nav-bar"
                class="nav-bar"
                hx-swap-oob=[out_of_band.then_some("true")]
            {
                span class="nav-brand" { "Pocket Ledger" }

                ul class="nav-links"
                {
                    @for link in self.links {
                        li { (link.into_html()) }
                    }
                }

                button
                    type="button"
                    class="nav-theme-button"
                    hx-get=(endpoints::THEME_API)
                    hx-target=(format!("#{EDIT_MODAL_ID}"))
                    hx-target-error="#alert-container"
                {
                    "Theme"
                }
            }
        )
    }
}
