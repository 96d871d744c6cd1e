//! The view for a single ledger: a form for adding to it and its
//! transactions, newest first.

use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    html::format_currency,
    transaction::{LedgerSnapshot, Nature, add_form_view, transactions_list},
};

pub(crate) fn ledger_title(nature: Nature) -> &'static str {
    match nature {
        Nature::Incomes => "Incomes",
        Nature::Outcomes => "Outcomes",
    }
}

pub(crate) fn ledger_view(
    nature: Nature,
    snapshot: &LedgerSnapshot,
    local_offset: UtcOffset,
) -> Markup {
    html! {
        h1 class="view-title" { (ledger_title(nature)) }

        (add_form_view(nature))

        p class="ledger-total"
        {
            "Total: " (format_currency(snapshot.total(nature)))
        }

        (transactions_list(
            &format!("Recent {nature}"),
            snapshot.sorted(nature),
            local_offset,
        ))
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::UtcOffset;

    use crate::{
        test_utils::{assert_hx_endpoint, must_get_form},
        transaction::{LedgerSnapshot, Motive, Nature, Transaction},
    };

    use super::ledger_view;

    fn outcome(motive: &str, time: i64) -> Transaction {
        Transaction {
            nature: Nature::Outcomes,
            motive: Motive::new_unchecked(motive),
            amount: 10.25,
            time,
        }
    }

    #[test]
    fn shows_only_its_ledger_newest_first() {
        let snapshot = LedgerSnapshot::new(
            vec![Transaction {
                nature: Nature::Incomes,
                motive: Motive::new_unchecked("Salary"),
                amount: 1000.0,
                time: 5000,
            }],
            vec![outcome("Coffee", 1000), outcome("Lunch", 2000)],
        );

        let html = Html::parse_fragment(
            &ledger_view(Nature::Outcomes, &snapshot, UtcOffset::UTC).into_string(),
        );

        let motives = html
            .select(&Selector::parse("li .transaction-motive").unwrap())
            .map(|motive| motive.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(motives, ["Lunch", "Coffee"]);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Recent outcomes"));
        assert!(text.contains("Total: $20.50"));
    }

    #[test]
    fn has_add_form() {
        let html = Html::parse_fragment(
            &ledger_view(Nature::Incomes, &LedgerSnapshot::default(), UtcOffset::UTC)
                .into_string(),
        );

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/api/transactions", "hx-post");
    }
}
