//! Transactions: the two ledgers, the store that persists them, the derived
//! summaries, and the forms and endpoints for changing them.

mod endpoints;
mod form;
mod models;
mod store;
mod summary;
mod view;

pub(crate) use endpoints::{
    create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
    get_edit_transaction_form,
};
pub(crate) use form::add_form_view;
pub use models::{
    Identity, Motive, Nature, NewTransaction, Timestamp, Transaction, TransactionPatch,
    now_millis, parse_amount,
};
pub use store::{LedgerUpdate, TransactionStore};
pub use summary::{LedgerSnapshot, combined_sorted, sorted_descending_by_time, total_amount};
pub(crate) use view::transactions_list;
