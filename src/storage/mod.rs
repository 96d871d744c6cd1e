//! The persistent key/value namespace shared by the whole application.
//!
//! Ledgers are stored as JSON arrays under the ledger's name and the theme
//! preference is stored as a plain string. [load_transactions] and
//! [save_transactions] sit on the boundary between the store and the rest of
//! the application: they log failures and never return an error.

mod memory;
mod sqlite;

pub use memory::InMemoryKeyValueStore;
pub use sqlite::{SQLiteKeyValueStore, create_key_value_table};

use crate::{Error, transaction::Transaction};

/// Reads and writes raw text values by key.
pub trait KeyValueStore {
    /// Get the value stored under `key`, or `None` if nothing has been stored.
    ///
    /// # Errors
    /// Returns an error if the underlying storage could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Replace the value stored under `key`.
    ///
    /// Implementations must leave the previous value untouched on failure.
    ///
    /// # Errors
    /// Returns an error if the value could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Load the transactions stored under `key`.
///
/// Returns an empty list if nothing is stored under `key`, or if the stored
/// value cannot be read or parsed. Failures are logged.
pub fn load_transactions(store: &impl KeyValueStore, key: &str) -> Vec<Transaction> {
    let text = match store.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::error!("Error loading transactions {key}: {error}");
            return Vec::new();
        }
    };

    serde_json::from_str(&text).unwrap_or_else(|error| {
        tracing::error!("Error loading transactions {key}: {error}");
        Vec::new()
    })
}

/// Save `transactions` under `key`, replacing the previously stored list.
///
/// On failure the error is logged and the previously stored list is kept.
pub fn save_transactions(store: &mut impl KeyValueStore, key: &str, transactions: &[Transaction]) {
    let result = serde_json::to_string(transactions)
        .map_err(Error::from)
        .and_then(|text| store.set(key, &text));

    if let Err(error) = result {
        tracing::error!(
            "Error while saving {} transactions to {key}: {error}",
            transactions.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::transaction::{Motive, Nature, Transaction};

    use super::{InMemoryKeyValueStore, KeyValueStore, load_transactions, save_transactions};

    fn transaction(motive: &str, amount: f64, time: i64) -> Transaction {
        Transaction {
            nature: Nature::Incomes,
            motive: Motive::new_unchecked(motive),
            amount,
            time,
        }
    }

    #[test]
    fn load_missing_key_returns_empty_list() {
        let store = InMemoryKeyValueStore::new();

        assert_eq!(load_transactions(&store, "incomes"), Vec::new());
    }

    #[test]
    fn load_corrupt_value_returns_empty_list() {
        let mut store = InMemoryKeyValueStore::new();
        store.set("incomes", "{not json").unwrap();

        assert_eq!(load_transactions(&store, "incomes"), Vec::new());
    }

    #[test]
    fn save_then_load_returns_saved_list() {
        let mut store = InMemoryKeyValueStore::new();
        let want = vec![
            transaction("Salary", 1000.0, 1000),
            transaction("Bonus", 250.5, 2000),
        ];

        save_transactions(&mut store, "incomes", &want);

        assert_eq!(load_transactions(&store, "incomes"), want);
    }

    #[test]
    fn saves_flat_json_objects() {
        let mut store = InMemoryKeyValueStore::new();

        save_transactions(&mut store, "incomes", &[transaction("Salary", 1000.0, 1000)]);

        assert_eq!(
            store.get("incomes").unwrap().unwrap(),
            r#"[{"nature":"incomes","motive":"Salary","amount":1000.0,"time":1000}]"#
        );
    }

    #[test]
    fn loads_json_written_by_other_clients() {
        let mut store = InMemoryKeyValueStore::new();
        store
            .set(
                "incomes",
                r#"[{"nature":"incomes","motive":"Salary","amount":1000,"time":1000}]"#,
            )
            .unwrap();

        assert_eq!(
            load_transactions(&store, "incomes"),
            vec![transaction("Salary", 1000.0, 1000)]
        );
    }

    #[test]
    fn failed_save_keeps_previous_list() {
        let previous = vec![transaction("Salary", 1000.0, 1000)];
        let mut store = InMemoryKeyValueStore::new();
        save_transactions(&mut store, "incomes", &previous);
        let quota = store.get("incomes").unwrap().unwrap().len();
        let mut store = store.with_quota(quota);

        save_transactions(
            &mut store,
            "incomes",
            &[
                transaction("Salary", 1000.0, 1000),
                transaction("Bonus", 250.0, 2000),
            ],
        );

        assert_eq!(load_transactions(&store, "incomes"), previous);
    }
}
