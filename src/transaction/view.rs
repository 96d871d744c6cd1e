//! HTML rendering for lists of transactions.

use maud::{Markup, html};
use time::UtcOffset;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    html::{EDIT_MODAL_ID, format_currency},
    timezone::format_day_month,
};

use super::models::{Nature, Transaction};

/// The max number of graphemes to display in a list row before truncating
/// and displaying ellipses.
const MAX_MOTIVE_GRAPHEMES: usize = 24;

fn truncate_motive(motive: &str) -> String {
    let mut graphemes = motive.graphemes(true);
    let truncated: String = graphemes.by_ref().take(MAX_MOTIVE_GRAPHEMES).collect();

    if graphemes.next().is_some() {
        format!("{truncated}…")
    } else {
        truncated
    }
}

fn nature_class(nature: Nature) -> &'static str {
    match nature {
        Nature::Incomes => "transaction transaction-income",
        Nature::Outcomes => "transaction transaction-outcome",
    }
}

fn transaction_row(transaction: &Transaction, local_offset: UtcOffset) -> Markup {
    let edit_url = endpoints::with_identity_query(
        endpoints::EDIT_TRANSACTION_FORM,
        transaction.nature,
        transaction.identity(),
    );

    html! {
        li
            class=(nature_class(transaction.nature))
            hx-get=(edit_url)
            hx-target=(format!("#{EDIT_MODAL_ID}"))
            hx-target-error="#alert-container"
            title="Edit transaction"
        {
            span class="transaction-date" { (format_day_month(transaction.time, local_offset)) }
            span class="transaction-motive" title=(transaction.motive) {
                (truncate_motive(transaction.motive.as_ref()))
            }
            span class="transaction-amount" { (format_currency(transaction.amount)) }
        }
    }
}

/// Render `transactions` in the given order under the heading `title`.
pub(crate) fn transactions_list(
    title: &str,
    transactions: &[Transaction],
    local_offset: UtcOffset,
) -> Markup {
    html! {
        section class="transactions"
        {
            h2 class="transactions-title" { (title) }

            @if transactions.is_empty() {
                p class="transactions-empty" { "No transactions yet" }
            } @else {
                ul class="transactions-list"
                {
                    @for transaction in transactions {
                        (transaction_row(transaction, local_offset))
                    }
                }
            }
        }
    }
}
