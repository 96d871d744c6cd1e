//! The dashboard view: ledger totals and the most recent transactions from
//! both ledgers.

use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    html::currency_rounded_with_tooltip,
    transaction::{LedgerSnapshot, transactions_list},
};

fn summary_card(title: &str, amount: f64, class: &str) -> Markup {
    html! {
        div class=(class) aria-label=(title)
        {
            h3 class="card-title" { (title) }
            p class="card-amount" { (currency_rounded_with_tooltip(amount)) }
        }
    }
}

fn balance_class(balance: f64) -> &'static str {
    if balance < 0.0 {
        "card card-balance card-balance-negative"
    } else {
        "card card-balance"
    }
}

pub(crate) fn dashboard_view(snapshot: &LedgerSnapshot, local_offset: UtcOffset) -> Markup {
    let net_balance = snapshot.net_balance();

    html! {
        h1 class="view-title" { "Dashboard" }

        section class="monitor"
        {
            (summary_card("Total Income", snapshot.total_incomes, "card card-income"))
            (summary_card("Total Outcome", snapshot.total_outcomes, "card card-outcome"))
            (summary_card("Net Balance", net_balance, balance_class(net_balance)))
        }

        (transactions_list("Recent Transactions", &snapshot.combined_sorted, local_offset))
    }
}

#[cfg(test)]
mod tests {
    use scraper::{ElementRef, Html, Selector};
    use time::UtcOffset;

    use crate::transaction::{LedgerSnapshot, Motive, Nature, Transaction};

    use super::dashboard_view;

    fn transaction(nature: Nature, motive: &str, amount: f64, time: i64) -> Transaction {
        Transaction {
            nature,
            motive: Motive::new_unchecked(motive),
            amount,
            time,
        }
    }

    #[track_caller]
    fn card_text<'a>(html: &'a Html, title: &str) -> String {
        let selector = Selector::parse(&format!("div[aria-label='{title}']")).unwrap();
        let card: ElementRef<'a> = html
            .select(&selector)
            .next()
            .unwrap_or_else(|| panic!("No card found for {title}"));

        card.text().collect()
    }

    #[test]
    fn shows_totals_and_balance() {
        let snapshot = LedgerSnapshot::new(
            vec![
                transaction(Nature::Incomes, "Salary", 1000.0, 1000),
                transaction(Nature::Incomes, "Bonus", 250.0, 3000),
            ],
            vec![transaction(Nature::Outcomes, "Rent", 1500.0, 2000)],
        );

        let html = Html::parse_fragment(&dashboard_view(&snapshot, UtcOffset::UTC).into_string());

        assert!(card_text(&html, "Total Income").contains("$1,250"));
        assert!(card_text(&html, "Total Outcome").contains("$1,500"));
        assert!(card_text(&html, "Net Balance").contains("-$250"));
    }

    #[test]
    fn lists_both_ledgers_newest_first() {
        let snapshot = LedgerSnapshot::new(
            vec![transaction(Nature::Incomes, "Salary", 1000.0, 1000)],
            vec![transaction(Nature::Outcomes, "Rent", 500.0, 2000)],
        );

        let html = Html::parse_fragment(&dashboard_view(&snapshot, UtcOffset::UTC).into_string());

        let motives = html
            .select(&Selector::parse("li .transaction-motive").unwrap())
            .map(|motive| motive.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(motives, ["Rent", "Salary"]);
    }

    #[test]
    fn empty_dashboard_shows_zero_totals() {
        let html = Html::parse_fragment(
            &dashboard_view(&LedgerSnapshot::default(), UtcOffset::UTC).into_string(),
        );

        assert!(card_text(&html, "Net Balance").contains("$0"));
        assert!(
            html.root_element()
                .text()
                .collect::<String>()
                .contains("No transactions yet")
        );
    }
}
