//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    pages::{get_page, get_unknown_page},
    theme::{get_theme_picker, set_theme_endpoint},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_form,
    },
};

/// Return a router with all the app's routes.
///
/// The view paths only answer GET. Other GET requests fall through to
/// [get_unknown_page], and unmatched requests with any other method are
/// rejected before they reach the history router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(&state.home_path, get(get_page))
        .route(endpoints::INCOMES_VIEW, get(get_page))
        .route(endpoints::OUTCOMES_VIEW, get(get_page))
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::EDIT_TRANSACTION_FORM,
            get(get_edit_transaction_form),
        )
        .route(
            endpoints::THEME_API,
            get(get_theme_picker).post(set_theme_endpoint),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get(get_unknown_page))
        .with_state(state)
}
