//! The app's views and the handler that serves them.
//!
//! GET requests for a view path, and page visits to unknown paths, land in
//! [get_page], which hands the path to the history router:
//! - a full page load, or htmx asking to restore a history entry it has no
//!   snapshot of, follows the browser to that entry and renders the whole
//!   page;
//! - an htmx request from a navigation link navigates the router, and the
//!   response tells the browser to push the new path onto its history.
//!
//! Every browser tab shares the one router, so htmx requests carry the path
//! the tab is showing (`HX-Current-URL`) and the router follows it first.

use axum::{
    extract::{FromRef, State},
    http::{
        HeaderMap, StatusCode, Uri,
        header::{ACCEPT, VARY},
    },
    response::{IntoResponse, Response},
};
use axum_htmx::{HxCurrentUrl, HxHistoryRestoreRequest, HxPushUrl, HxRequest};
use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    AppState, Error,
    dashboard::dashboard_view,
    endpoints,
    html::{APP_VIEW_ID, PAGE_CONTAINER_STYLE, base},
    ledger_page::{ledger_title, ledger_view},
    navigation::NavBar,
    not_found::not_found_view,
    router::{Navigation, Route, Routes},
    service::{AppHandle, PageState},
    timezone::get_local_offset,
    transaction::Nature,
};

/// The views the router can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Ledger totals and recent transactions from both ledgers.
    Dashboard,
    /// The incomes ledger.
    Incomes,
    /// The outcomes ledger.
    Outcomes,
}

/// The app's route set, with the dashboard at `home_path`.
///
/// # Errors
/// Returns [Error::DuplicateRoute] if `home_path` collides with another view.
pub fn app_routes(home_path: &str) -> Result<Routes<View>, Error> {
    Routes::new(vec![
        Route::new(home_path, View::Dashboard),
        Route::new(endpoints::INCOMES_VIEW, View::Incomes),
        Route::new(endpoints::OUTCOMES_VIEW, View::Outcomes),
    ])
}

fn page_title(view: Option<View>) -> &'static str {
    match view {
        Some(View::Dashboard) => "Dashboard",
        Some(View::Incomes) => ledger_title(Nature::Incomes),
        Some(View::Outcomes) => ledger_title(Nature::Outcomes),
        None => "Not Found",
    }
}

fn main_view(page: &PageState, local_offset: UtcOffset) -> Markup {
    html! {
        main id=(APP_VIEW_ID) class=(PAGE_CONTAINER_STYLE)
        {
            @match page.view {
                Some(View::Dashboard) => (dashboard_view(&page.snapshot, local_offset)),
                Some(View::Incomes) => (ledger_view(Nature::Incomes, &page.snapshot, local_offset)),
                Some(View::Outcomes) => (ledger_view(Nature::Outcomes, &page.snapshot, local_offset)),
                None => (not_found_view(page.context.home_path())),
            }
        }
    }
}

/// The active view plus an out-of-band navigation bar, for swapping into an
/// already loaded page.
pub(crate) fn view_fragment(page: &PageState, local_offset: UtcOffset) -> Result<Markup, Error> {
    let nav_bar = NavBar::new(Some(&page.context))?.into_html(true);

    Ok(html! {
        (main_view(page, local_offset))
        (nav_bar)
    })
}

fn full_page(page: &PageState, local_offset: UtcOffset) -> Result<Markup, Error> {
    let nav_bar = NavBar::new(Some(&page.context))?.into_html(false);
    let content = html! {
        (nav_bar)
        (main_view(page, local_offset))
    };

    Ok(base(page_title(page.view), page.theme, &content))
}

/// The state needed to serve views.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub app: AppHandle,
    pub local_timezone: String,
}

impl FromRef<AppState> for ViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            app: state.app.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The path of the page the requesting tab is showing, from the
/// `HX-Current-URL` header.
pub(crate) fn browser_path(current_url: &HxCurrentUrl) -> Option<&str> {
    current_url.0.as_ref().map(Uri::path)
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Serve the view registered for the request path.
pub async fn get_page(
    State(state): State<ViewState>,
    uri: Uri,
    HxRequest(is_htmx_request): HxRequest,
    HxHistoryRestoreRequest(is_history_restore): HxHistoryRestoreRequest,
    current_url: HxCurrentUrl,
) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };
    let path = uri.path();

    if is_htmx_request && !is_history_restore {
        navigate_to(&state.app, path, browser_path(&current_url), local_offset).await
    } else {
        load_page(&state.app, path, local_offset).await
    }
}

/// Serve a GET request for a path with no view or endpoint.
///
/// Page visits still reach the router, which shows the not-found view.
/// Anything else, such as the browser fetching `/favicon.ico`, gets a bare
/// 404 and leaves the router where it is.
pub async fn get_unknown_page(
    state: State<ViewState>,
    uri: Uri,
    headers: HeaderMap,
    hx_request: HxRequest,
    hx_history_restore: HxHistoryRestoreRequest,
    current_url: HxCurrentUrl,
) -> Response {
    if !hx_request.0 && !accepts_html(&headers) {
        tracing::debug!("Not a page visit, not routing {}", uri.path());
        return StatusCode::NOT_FOUND.into_response();
    }

    get_page(state, uri, hx_request, hx_history_restore, current_url).await
}

async fn navigate_to(
    app: &AppHandle,
    path: &str,
    browser_path: Option<&str>,
    local_offset: UtcOffset,
) -> Response {
    let outcome = match app.navigate(path, browser_path).await {
        Ok(outcome) => outcome,
        Err(error) => return error.into_alert_response(),
    };

    if outcome.navigation == Navigation::Unchanged {
        return StatusCode::NO_CONTENT.into_response();
    }

    let fragment = match view_fragment(&outcome.page, local_offset) {
        Ok(fragment) => fragment,
        Err(error) => return error.into_alert_response(),
    };
    let push_url = outcome.push_url.unwrap_or_else(|| path.to_owned());

    (HxPushUrl(push_url), [(VARY, "HX-Request")], fragment).into_response()
}

async fn load_page(app: &AppHandle, path: &str, local_offset: UtcOffset) -> Response {
    let page = match app.restore(path).await {
        Ok(page) => page,
        Err(error) => return error.into_response(),
    };

    let status = if page.view.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    match full_page(&page, local_offset) {
        Ok(markup) => (status, [(VARY, "HX-Request")], markup).into_response(),
        Err(error) => error.into_response(),
    }
}
