use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        APP_VIEW_ID, BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE,
        EDIT_MODAL_ID, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
    },
};

use super::models::{Nature, Transaction};

fn motive_input(value: Option<&str>) -> Markup {
    html! {
        div
        {
            label for="motive" class=(FORM_LABEL_STYLE) { "Motive" }

            input
                name="motive"
                id="motive"
                type="text"
                placeholder="What was it for?"
                value=[value]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

fn amount_input(name: &str, value: Option<f64>) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { "Amount" }

            input
                name=(name)
                id=(name)
                type="number"
                step="any"
                placeholder="0.00"
                value=[value]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// The form for adding a transaction to the ledger `nature`.
///
/// A successful submit replaces the current view with the updated one.
pub(crate) fn add_form_view(nature: Nature) -> Markup {
    html! {
        form
            class=(FORM_CONTAINER_STYLE)
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target=(format!("#{APP_VIEW_ID}"))
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
        {
            input type="hidden" name="nature" value=(nature);

            (motive_input(None))

            (amount_input("amount", None))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add to " (nature) }
        }
    }
}

/// The form for changing or deleting `transaction`.
///
/// The hidden fields carry the identity the transaction had when the form
/// was rendered, which is how the endpoints find it again.
pub(crate) fn edit_form_view(transaction: &Transaction) -> Markup {
    let identity = transaction.identity();
    let delete_url =
        endpoints::with_identity_query(endpoints::TRANSACTIONS_API, transaction.nature, identity);
    let close_modal = format!("document.getElementById('{EDIT_MODAL_ID}').replaceChildren()");

    html! {
        div class="edit-transaction"
        {
            h2 { "Edit transaction" }

            form
                class=(FORM_CONTAINER_STYLE)
                hx-put=(endpoints::TRANSACTIONS_API)
                hx-target=(format!("#{APP_VIEW_ID}"))
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
            {
                input type="hidden" name="nature" value=(transaction.nature);
                input type="hidden" name="time" value=(identity.time);
                input type="hidden" name="amount" value=(identity.amount);

                (motive_input(Some(transaction.motive.as_ref())))

                (amount_input("new_amount", Some(transaction.amount)))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
            }

            button
                type="button"
                class=(BUTTON_DELETE_STYLE)
                hx-delete=(delete_url)
                hx-target=(format!("#{APP_VIEW_ID}"))
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                hx-confirm="Delete this transaction?"
            {
                "Delete"
            }

            button type="button" class=(BUTTON_SECONDARY_STYLE) onclick=(close_modal)
            {
                "Cancel"
            }
        }
    }
}
