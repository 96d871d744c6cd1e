//! Endpoints for adding, editing and deleting transactions.
//!
//! Successful requests respond with the re-rendered view of the tab that sent
//! them, plus an out-of-band success alert. Failed requests respond with an
//! error alert.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxCurrentUrl;
use maud::html;
use serde::Deserialize;
use time::UtcOffset;

use crate::{
    AppState, Error,
    alert::Alert,
    html::EDIT_MODAL_ID,
    pages::{browser_path, view_fragment},
    service::{AppHandle, PageState},
    timezone::get_local_offset,
};

use super::{
    form::edit_form_view,
    models::{Identity, Motive, Nature, NewTransaction, Timestamp, TransactionPatch, parse_amount},
};

/// The state needed for the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionEndpointState {
    pub app: AppHandle,
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            app: state.app.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl TransactionEndpointState {
    fn local_offset(&self) -> Result<UtcOffset, Error> {
        get_local_offset(&self.local_timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(self.local_timezone.clone()))
    }
}

/// Render the active view with `alert`, optionally closing the edit modal.
fn view_with_alert(
    page: &PageState,
    local_offset: UtcOffset,
    alert: Alert,
    close_modal: bool,
) -> Response {
    let fragment = match view_fragment(page, local_offset) {
        Ok(fragment) => fragment,
        Err(error) => return error.into_alert_response(),
    };

    html! {
        (fragment)
        (alert.into_oob_html())

        @if close_modal {
            div id=(EDIT_MODAL_ID) hx-swap-oob="innerHTML" {}
        }
    }
    .into_response()
}

/// The form data for adding a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub nature: String,
    pub motive: String,
    pub amount: String,
}

impl TransactionForm {
    fn parse(&self) -> Result<(Nature, NewTransaction), Error> {
        let nature: Nature = self.nature.parse()?;
        let motive = Motive::new(&self.motive)?;
        let amount = parse_amount(&self.amount)?;

        Ok((nature, NewTransaction::now(motive, amount)))
    }
}

/// A route handler for adding a transaction to a ledger.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    current_url: HxCurrentUrl,
    Form(form): Form<TransactionForm>,
) -> Response {
    let (nature, transaction) = match form.parse() {
        Ok(parsed) => parsed,
        Err(error) => return error.into_alert_response(),
    };
    let local_offset = match state.local_offset() {
        Ok(offset) => offset,
        Err(error) => return error.into_alert_response(),
    };
    let details = format!("{}: {}", transaction.motive, transaction.amount);

    match state
        .app
        .add(nature, transaction, browser_path(&current_url))
        .await {
        Ok(page) => view_with_alert(
            &page,
            local_offset,
            Alert::Success {
                message: format!("New transaction added to {nature}"),
                details,
            },
            false,
        ),
        Err(error) => error.into_alert_response(),
    }
}

/// Identifies a transaction in a query string.
#[derive(Debug, Deserialize)]
pub struct IdentityQuery {
    pub nature: String,
    pub time: Timestamp,
    pub amount: f64,
}

impl IdentityQuery {
    fn parse(&self) -> Result<(Nature, Identity), Error> {
        let nature: Nature = self.nature.parse()?;

        Ok((
            nature,
            Identity {
                time: self.time,
                amount: self.amount,
            },
        ))
    }
}

/// Render the edit form for the transaction identified in the query string.
pub async fn get_edit_transaction_form(
    State(state): State<TransactionEndpointState>,
    Query(query): Query<IdentityQuery>,
) -> Response {
    let (nature, identity) = match query.parse() {
        Ok(parsed) => parsed,
        Err(error) => return error.into_alert_response(),
    };

    let page = match state.app.page().await {
        Ok(page) => page,
        Err(error) => return error.into_alert_response(),
    };

    match page
        .snapshot
        .ledger(nature)
        .iter()
        .find(|transaction| identity.matches(transaction))
    {
        Some(transaction) => edit_form_view(transaction).into_response(),
        None => Error::UpdateMissingTransaction.into_alert_response(),
    }
}

/// The form data for editing a transaction.
///
/// `time` and `amount` are the values the transaction had when the form was
/// rendered. `new_amount` is the amount to change it to.
#[derive(Debug, Deserialize)]
pub struct EditTransactionForm {
    pub nature: String,
    pub time: Timestamp,
    pub amount: f64,
    pub motive: String,
    pub new_amount: String,
}

impl EditTransactionForm {
    fn parse(&self) -> Result<(Nature, Identity, TransactionPatch), Error> {
        let nature: Nature = self.nature.parse()?;
        let patch = TransactionPatch {
            motive: Some(Motive::new(&self.motive)?),
            amount: Some(parse_amount(&self.new_amount)?),
            time: None,
        };

        Ok((
            nature,
            Identity {
                time: self.time,
                amount: self.amount,
            },
            patch,
        ))
    }
}

/// A route handler for changing the motive and amount of a transaction.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    current_url: HxCurrentUrl,
    Form(form): Form<EditTransactionForm>,
) -> Response {
    let (nature, identity, patch) = match form.parse() {
        Ok(parsed) => parsed,
        Err(error) => return error.into_alert_response(),
    };
    let local_offset = match state.local_offset() {
        Ok(offset) => offset,
        Err(error) => return error.into_alert_response(),
    };

    match state
        .app
        .edit(nature, identity, patch, browser_path(&current_url))
        .await {
        Ok(outcome) if outcome.applied => view_with_alert(
            &outcome.page,
            local_offset,
            Alert::SuccessSimple {
                message: format!("Transaction modified in {nature}"),
            },
            true,
        ),
        Ok(_) => Error::UpdateMissingTransaction.into_alert_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// A route handler for deleting the transaction identified in the query
/// string.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    current_url: HxCurrentUrl,
    Query(query): Query<IdentityQuery>,
) -> Response {
    let (nature, identity) = match query.parse() {
        Ok(parsed) => parsed,
        Err(error) => return error.into_alert_response(),
    };
    let local_offset = match state.local_offset() {
        Ok(offset) => offset,
        Err(error) => return error.into_alert_response(),
    };

    match state
        .app
        .delete(nature, identity, browser_path(&current_url))
        .await {
        Ok(outcome) if outcome.applied => view_with_alert(
            &outcome.page,
            local_offset,
            Alert::SuccessSimple {
                message: format!("Transaction deleted from {nature}"),
            },
            true,
        ),
        Ok(_) => Error::DeleteMissingTransaction.into_alert_response(),
        Err(error) => error.into_alert_response(),
    }
}
