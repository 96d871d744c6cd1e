//! The paths of the app's views and API endpoints.

use crate::transaction::{Identity, Nature};

pub const ROOT: &str = "/";
pub const INCOMES_VIEW: &str = "/incomes";
pub const OUTCOMES_VIEW: &str = "/outcomes";
pub const TRANSACTIONS_API: &str = "/api/transactions";
pub const EDIT_TRANSACTION_FORM: &str = "/api/transactions/edit";
pub const THEME_API: &str = "/api/theme";
pub const STATIC: &str = "/static";

/// `endpoint` with a query string that identifies a transaction.
pub fn with_identity_query(endpoint: &str, nature: Nature, identity: Identity) -> String {
    format!(
        "{endpoint}?nature={nature}&time={}&amount={}",
        identity.time, identity.amount
    )
}
